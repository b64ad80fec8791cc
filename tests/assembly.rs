//! Offline integration tests: structured-output parsing and per-page
//! assembly through the public API. No network, always run.

use adobe_pdf_extract::pipeline::assemble::assemble_documents;
use adobe_pdf_extract::StructuredOutput;
use serde_json::json;

fn reference_output() -> StructuredOutput {
    serde_json::from_value(json!({
        "elements": [
            {"Text": "Hello", "Page": 0},
            {"Text": "World", "Page": 0},
            {"Text": "Second page", "Page": 1},
        ]
    }))
    .unwrap()
}

#[test]
fn reference_scenario_with_metadata() {
    let docs = assemble_documents(&reference_output(), true, None);

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].text, "Hello\nWorld\n");
    assert_eq!(docs[0].metadata.len(), 1);
    assert_eq!(docs[0].page_number(), Some(0));
    assert_eq!(docs[1].text, "Second page\n");
    assert_eq!(docs[1].metadata.len(), 1);
    assert_eq!(docs[1].page_number(), Some(1));
}

#[test]
fn reference_scenario_without_metadata() {
    let docs = assemble_documents(&reference_output(), false, None);

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].text, "Hello\nWorld\n");
    assert_eq!(docs[1].text, "Second page\n");
    assert!(docs[0].metadata.is_empty());
    assert!(docs[1].metadata.is_empty());
}

#[test]
fn extra_schema_fields_are_ignored() {
    // Real structuredData.json carries Path, Bounds, Font, attributes, …
    let output: StructuredOutput = serde_json::from_value(json!({
        "version": {"json_export": "1.2.0", "schema": "1.1.0"},
        "extended_metadata": {"page_count": 1},
        "elements": [
            {
                "Text": "Heading",
                "Page": 0,
                "Path": "//Document/H1",
                "Bounds": [56.6, 745.9, 322.2, 772.6],
                "Font": {"name": "Minion", "family_name": "Minion Pro"},
                "TextSize": 22.5
            }
        ]
    }))
    .unwrap();

    let docs = assemble_documents(&output, true, None);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].text, "Heading\n");
}
