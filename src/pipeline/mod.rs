//! Pipeline stages for cloud text extraction.
//!
//! Each submodule implements exactly one step, and each step's return value
//! is the next step's argument — there is no hidden cross-stage state, so
//! interleaved extractions on one session cannot corrupt each other.
//!
//! ## Data Flow
//!
//! ```text
//! upload ──▶ job ──▶ result ──▶ assemble
//! (asset)  (location) (structured  (per-page
//!                      JSON)       documents)
//! ```
//!
//! 1. [`upload`]   — validate the local file and upload its bytes, yielding
//!    an asset handle
//! 2. [`job`]      — wrap the asset in an extract-job descriptor and submit
//!    it, yielding the job's status URL
//! 3. [`result`]   — await completion, download the result archive, and
//!    parse the `structuredData.json` entry; the only stage that blocks on
//!    the remote job
//! 4. [`assemble`] — group text fragments by page into output records; pure,
//!    no I/O

pub mod assemble;
pub mod job;
pub mod result;
pub mod upload;
