//! Assembly stage: fold the flat element list into per-page documents.
//!
//! Pure function of the structured output — no I/O, no session state — so it
//! is trivially idempotent: re-running it over the same parsed result with
//! the same flags yields structurally identical records.

use crate::output::{Document, PAGE_NUMBER_KEY};
use crate::pipeline::result::StructuredOutput;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Group text fragments by page number and emit one [`Document`] per page.
///
/// Fragments are concatenated in element order, each followed by `\n`, with
/// no normalisation or deduplication. Pages are emitted in the order they
/// first appear in the element sequence. Elements missing either a text
/// fragment or a page number are skipped; a page with no text-bearing
/// elements produces no record at all.
///
/// Each record's metadata starts as a copy of `extra_info` (or empty) and,
/// when `include_page_metadata` is set, gains a `page_number` entry.
pub fn assemble_documents(
    output: &StructuredOutput,
    include_page_metadata: bool,
    extra_info: Option<&Map<String, Value>>,
) -> Vec<Document> {
    let mut page_order: Vec<u64> = Vec::new();
    let mut text_per_page: HashMap<u64, String> = HashMap::new();

    for element in &output.elements {
        let (Some(text), Some(page)) = (element.text.as_deref(), element.page) else {
            continue;
        };
        let accumulated = text_per_page.entry(page).or_insert_with(|| {
            page_order.push(page);
            String::new()
        });
        accumulated.push_str(text);
        accumulated.push('\n');
    }

    debug!(
        elements = output.elements.len(),
        pages = page_order.len(),
        "Assembled per-page documents"
    );

    page_order
        .into_iter()
        .map(|page| {
            let mut metadata = extra_info.cloned().unwrap_or_default();
            if include_page_metadata {
                metadata.insert(PAGE_NUMBER_KEY.to_string(), Value::from(page));
            }
            Document {
                text: text_per_page.remove(&page).unwrap_or_default(),
                metadata,
            }
        })
        .collect()
}
