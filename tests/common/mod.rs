//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times; subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The fixture dataset as raw JSON.
#[allow(dead_code)]
pub fn fixture_document() -> Value {
    let content = std::fs::read_to_string(fixture_path("dataset.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// Write `doc` as `dataset.json` in `temp_dir` and return its path.
#[allow(dead_code)]
pub fn write_dataset(temp_dir: &TempDir, doc: &Value) -> PathBuf {
    let path = temp_dir.path().join("dataset.json");
    std::fs::write(&path, serde_json::to_string_pretty(doc).unwrap()).unwrap();
    path
}
