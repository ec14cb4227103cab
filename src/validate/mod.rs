//! Referential integrity of a dataset document.
//!
//! [validate] runs every check over the raw JSON document and returns the full list of
//! violations. It works on [serde_json::Value] rather than the typed [crate::dataset::Dataset]
//! so a record with a malformed field is reported instead of rejecting the whole document.
//!
//! Checks, in order:
//!
//! 1. ids are unique within each collection
//! 2. URNs are unique across all collections
//! 3. annotation segments point into their recipe's `annotations`
//! 4. ingredient items link to an ancient term, directly or through a pin
//! 5. identifications resolve their ancient term, product and material source
//! 6. curated homepage targets resolve
//! 7. people carry identity fields and known categories
//! 8. annotation link routes are static pages or resolvable typed routes
//!
//! Every check always runs. The same document always yields the same ordered list.

use serde_json::Value;
use std::path::Path;

pub mod checks;
pub mod curated;
pub mod index;
pub mod report;

pub use curated::{CuratedField, CuratedTarget, CuratedTargetSource, RegexCuratedSource};
pub use index::DocumentIndex;
pub use report::IntegrityError;

/// Validate `doc`. Pass `None` for `curated` to skip the curated homepage check.
#[tracing::instrument(skip_all)]
pub fn validate(doc: &Value, curated: Option<&dyn CuratedTargetSource>) -> Vec<IntegrityError> {
    let Some(root) = doc.as_object() else {
        return vec![IntegrityError::new(
            "",
            "",
            "",
            "dataset document is not a JSON object",
        )];
    };
    let index = DocumentIndex::build(root);
    let mut errors = Vec::new();
    checks::unique_ids(root, &mut errors);
    checks::unique_urns(root, &mut errors);
    checks::annotation_segments(root, &mut errors);
    checks::ingredient_terms(root, &index, &mut errors);
    checks::identification_chains(root, &index, &mut errors);
    match curated {
        Some(source) => checks::curated_targets(source, &index, &mut errors),
        None => tracing::debug!("[validate] no curated content; skipping curated targets"),
    }
    checks::people(root, &mut errors);
    checks::annotation_links(root, &index, &mut errors);
    tracing::info!("[validate] {} integrity errors", errors.len());
    errors
}

/// Validate the dataset file at `dataset_path` against the curated source at `curated_path`.
///
/// A dataset that cannot be read or parsed is itself reported as an integrity error. A curated
/// source that cannot be read is skipped.
pub fn validate_files<P, Q>(dataset_path: P, curated_path: Q) -> Vec<IntegrityError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let dataset_path = dataset_path.as_ref();
    let label = dataset_path.display().to_string();
    let content = match std::fs::read_to_string(dataset_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("[validate_files] cannot read {label}: {e}");
            return vec![IntegrityError::new(
                label,
                "",
                "",
                format!("cannot read dataset: {e}"),
            )];
        }
    };
    let doc: Value = match serde_json::from_str(&content) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!("[validate_files] cannot parse {label}: {e}");
            return vec![IntegrityError::new(
                label,
                "",
                "",
                format!("invalid dataset JSON: {e}"),
            )];
        }
    };
    let curated = RegexCuratedSource::from_path(curated_path);
    validate(&doc, curated.as_ref().map(|c| c as &dyn CuratedTargetSource))
}
