//! Targets referenced by the curated homepage content.
//!
//! The curated content is TypeScript source, so targets are found by a textual scan for
//! `route:`, `recipeRoute:` and `recipeSlug:` string literals. The scan sits behind
//! [CuratedTargetSource] so a structured content source can replace it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::{fs::read_to_string, path::Path};

/// Which property a curated target was assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CuratedField {
    Route,
    RecipeRoute,
    RecipeSlug,
}

impl CuratedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CuratedField::Route => "route",
            CuratedField::RecipeRoute => "recipeRoute",
            CuratedField::RecipeSlug => "recipeSlug",
        }
    }

    fn parse(s: &str) -> Option<CuratedField> {
        match s {
            "route" => Some(CuratedField::Route),
            "recipeRoute" => Some(CuratedField::RecipeRoute),
            "recipeSlug" => Some(CuratedField::RecipeSlug),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CuratedTarget {
    pub field: CuratedField,
    pub value: String,
    /// 1-based line of the assignment in the source text.
    pub line: usize,
}

/// Anything that can list the homepage's curated targets.
pub trait CuratedTargetSource {
    /// Label used as the `path` of errors about these targets.
    fn name(&self) -> &str {
        "curated"
    }

    fn targets(&self) -> Vec<CuratedTarget>;
}

static CURATED_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(route|recipeRoute|recipeSlug)\s*:\s*(?:"([^"\n]*)"|'([^'\n]*)'|`([^`\n]*)`)"#)
        .expect("curated assignment pattern is valid")
});

/// Regex scan over curated TypeScript source text.
#[derive(Debug, Clone, Default)]
pub struct RegexCuratedSource {
    name: String,
    text: String,
}

impl RegexCuratedSource {
    pub fn new(text: &str) -> Self {
        RegexCuratedSource {
            name: "curated".to_string(),
            text: text.to_string(),
        }
    }

    /// Reads `path`; an unreadable file yields `None` so the curated check is skipped.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        match read_to_string(path) {
            Ok(text) => Some(RegexCuratedSource {
                name: path.display().to_string(),
                text,
            }),
            Err(e) => {
                tracing::info!(
                    "[RegexCuratedSource] skipping curated target check, cannot read {:?}: {e}",
                    path
                );
                None
            }
        }
    }
}

impl CuratedTargetSource for RegexCuratedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn targets(&self) -> Vec<CuratedTarget> {
        let mut targets = Vec::new();
        for (idx, line) in self.text.lines().enumerate() {
            for caps in CURATED_ASSIGNMENT.captures_iter(line) {
                let Some(field) = caps.get(1).and_then(|m| CuratedField::parse(m.as_str()))
                else {
                    continue;
                };
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default();
                targets.push(CuratedTarget {
                    field,
                    value,
                    line: idx + 1,
                });
            }
        }
        tracing::debug!(
            "[RegexCuratedSource::targets] found {} targets in {}",
            targets.len(),
            self.name
        );
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::SAMPLE_CURATED;
    use test_log::test;

    #[test]
    fn scans_every_quote_style() {
        let source = RegexCuratedSource::new(
            "export const hero = { route: \"recipe:r1\", recipeSlug: 'rose-oil' };\n\
             const tiles = [{ recipeRoute:`work:w1` }, { label: 'x', route : \"archive\" }];\n\
             // routes: not an assignment\n\
             const nested = { myroute: \"nope\" };",
        );
        let targets = source.targets();
        let found: Vec<(CuratedField, &str, usize)> = targets
            .iter()
            .map(|t| (t.field, t.value.as_str(), t.line))
            .collect();
        assert_eq!(
            found,
            vec![
                (CuratedField::Route, "recipe:r1", 1),
                (CuratedField::RecipeSlug, "rose-oil", 1),
                (CuratedField::RecipeRoute, "work:w1", 2),
                (CuratedField::Route, "archive", 2),
            ]
        );
    }

    #[test]
    fn fixture_targets() {
        let targets = RegexCuratedSource::new(SAMPLE_CURATED).targets();
        assert_eq!(targets.len(), 6);
        assert_eq!(targets[0].field, CuratedField::RecipeSlug);
        assert!(targets.iter().any(|t| t.value == "ancient-term:at-smyrna"));
    }

    #[test]
    fn unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RegexCuratedSource::from_path(dir.path().join("missing.ts")).is_none());
        let path = dir.path().join("curated.ts");
        std::fs::write(&path, "{ route: \"home\" }").unwrap();
        let source = RegexCuratedSource::from_path(&path).unwrap();
        assert_eq!(source.targets().len(), 1);
        assert_eq!(source.name(), path.display().to_string());
    }
}
