//! Shared test utilities for dataset, routing and validation tests

use crate::dataset::Dataset;
use serde_json::Value;

pub const SAMPLE_DATASET: &str = include_str!("../../tests/fixtures/dataset.json");
pub const SAMPLE_CURATED: &str = include_str!("../../tests/fixtures/curated.ts");

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// The fixture document as raw JSON, the shape the validator consumes.
pub fn sample_document() -> Value {
    init_logging();
    serde_json::from_str(SAMPLE_DATASET).expect("fixture dataset is valid JSON")
}

/// The fixture document as a typed [Dataset].
pub fn sample_dataset() -> Dataset {
    init_logging();
    Dataset::from_json_str(SAMPLE_DATASET).expect("fixture dataset deserializes")
}

/// Looks up `pointer` (RFC 6901) in `doc` and replaces it with `value`.
pub fn set_pointer(doc: &mut Value, pointer: &str, value: Value) {
    *doc
        .pointer_mut(pointer)
        .unwrap_or_else(|| panic!("fixture has no {pointer}")) = value;
}

/// Appends `value` to the array at `pointer`.
pub fn push_pointer(doc: &mut Value, pointer: &str, value: Value) {
    doc.pointer_mut(pointer)
        .and_then(Value::as_array_mut)
        .unwrap_or_else(|| panic!("fixture has no array at {pointer}"))
        .push(value);
}
