use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One referential-integrity violation.
///
/// `path` names the collection (or source file) holding the offending record, `entity_id` the
/// record within it, and `field` the dotted path to the offending value inside that record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityError {
    pub path: String,
    pub entity_id: String,
    pub field: String,
    pub reason: String,
}

impl IntegrityError {
    pub fn new(
        path: impl Into<String>,
        entity_id: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        IntegrityError {
            path: path.into(),
            entity_id: entity_id.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// Tabs and line breaks inside a cell would break the one-line-per-error format.
fn cell(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

/// `path<TAB>entityId<TAB>field<TAB>reason`
impl Display for IntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            cell(&self.path),
            cell(&self.entity_id),
            cell(&self.field),
            cell(&self.reason)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn displays_as_tab_separated_line() {
        let err = IntegrityError::new(
            "recipes",
            "r1",
            "annotations.a1.links[0].route",
            "legacy route string \"recipe_rose\"",
        );
        assert_eq!(
            err.to_string(),
            "recipes\tr1\tannotations.a1.links[0].route\tlegacy route string \"recipe_rose\""
        );
        let messy = IntegrityError::new("curated", "a\tb", "route", "line\nbreak");
        assert_eq!(messy.to_string().split('\t').count(), 4);
        assert!(!messy.to_string().contains('\n'));
    }
}
