//! Slug and URN derivation for dataset records.
//!
//! Slugs are human-readable and unique per collection; URNs (`urn:aos:<kind>:<slug>`) are unique
//! across the whole dataset.

use std::collections::BTreeSet;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

pub const URN_PREFIX: &str = "urn:aos";

/// Record kinds that carry a URN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrnKind {
    Recipe,
    Ingredient,
    Tool,
    Process,
    Work,
    Person,
    AncientTerm,
    Identification,
    IngredientProduct,
    MaterialSource,
}

impl UrnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrnKind::Recipe => "recipe",
            UrnKind::Ingredient => "ingredient",
            UrnKind::Tool => "tool",
            UrnKind::Process => "process",
            UrnKind::Work => "work",
            UrnKind::Person => "person",
            UrnKind::AncientTerm => "ancient-term",
            UrnKind::Identification => "identification",
            UrnKind::IngredientProduct => "ingredient-product",
            UrnKind::MaterialSource => "material-source",
        }
    }

    pub fn parse(s: &str) -> Option<UrnKind> {
        [
            UrnKind::Recipe,
            UrnKind::Ingredient,
            UrnKind::Tool,
            UrnKind::Process,
            UrnKind::Work,
            UrnKind::Person,
            UrnKind::AncientTerm,
            UrnKind::Identification,
            UrnKind::IngredientProduct,
            UrnKind::MaterialSource,
        ]
        .into_iter()
        .find(|k| k.as_str() == s)
    }
}

/// Turn free text into a slug: diacritics folded, lowercase, runs of anything that is not a
/// letter or digit collapsed into a single `-`.
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    let mut slug = String::with_capacity(folded.len());
    let mut pending_sep = false;
    for c in folded.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }
    slug
}

/// Recipe slugs combine the title with the (optional) author.
pub fn recipe_slug(title: &str, author: Option<&str>) -> String {
    match author.map(str::trim).filter(|a| !a.is_empty()) {
        Some(author) => slugify(&format!("{title} {author}")),
        None => slugify(title),
    }
}

pub fn urn_for(kind: UrnKind, slug: &str) -> String {
    format!("{URN_PREFIX}:{}:{slug}", kind.as_str())
}

/// Splits a URN into its kind and slug, if it is one of ours.
pub fn parse_urn(urn: &str) -> Option<(UrnKind, &str)> {
    let rest = urn.strip_prefix(URN_PREFIX)?.strip_prefix(':')?;
    let (kind, slug) = rest.split_once(':')?;
    if slug.is_empty() {
        return None;
    }
    Some((UrnKind::parse(kind)?, slug))
}

/// Appends `-2`, `-3`, ... to `base` until the result is not in `taken`.
pub fn unique_slug(base: &str, taken: &BTreeSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    let mut n = 2usize;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rose Perfume"), "rose-perfume");
        assert_eq!(slugify("  Megaleion (Theophrastus)  "), "megaleion-theophrastus");
        assert_eq!(slugify("Kinnamōmon"), "kinnamomon");
        assert_eq!(slugify("Œnanthe & Co."), "œnanthe-co");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_recipe_slug() {
        assert_eq!(
            recipe_slug("Rose Perfume", Some("Dioscorides")),
            "rose-perfume-dioscorides"
        );
        assert_eq!(recipe_slug("Rose Perfume", Some("  ")), "rose-perfume");
        assert_eq!(recipe_slug("Rose Perfume", None), "rose-perfume");
    }

    #[test]
    fn test_urns() {
        let urn = urn_for(UrnKind::AncientTerm, "smyrna");
        assert_eq!(urn, "urn:aos:ancient-term:smyrna");
        assert_eq!(parse_urn(&urn), Some((UrnKind::AncientTerm, "smyrna")));
        assert_eq!(parse_urn("urn:aos:recipe:"), None);
        assert_eq!(parse_urn("urn:other:recipe:x"), None);
        assert_eq!(parse_urn("urn:aos:unicorn:x"), None);
    }

    #[test]
    fn test_unique_slug() {
        let taken: BTreeSet<String> = ["rose", "rose-2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(unique_slug("rose", &taken), "rose-3");
        assert_eq!(unique_slug("myrrh", &taken), "myrrh");
    }
}
