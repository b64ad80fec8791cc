//! Output types: the per-page records returned to the caller.

use serde::Serialize;
use serde_json::{Map, Value};

/// Metadata key under which a record's page number is stored (when enabled).
pub const PAGE_NUMBER_KEY: &str = "page_number";

/// One page's worth of extracted text plus its metadata.
///
/// `text` is the page's fragments joined in element order, each followed by a
/// newline. `metadata` starts as a copy of the caller-supplied extra info and
/// optionally gains a [`PAGE_NUMBER_KEY`] entry. Pages that yielded no text
/// produce no `Document` at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub text: String,
    pub metadata: Map<String, Value>,
}

impl Document {
    /// The page number this record was grouped under, if recorded.
    pub fn page_number(&self) -> Option<u64> {
        self.metadata.get(PAGE_NUMBER_KEY).and_then(Value::as_u64)
    }
}
