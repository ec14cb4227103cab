//! Field inheritance for recipe metadata.
//!
//! A recipe's author/date/language/place come from the first non-empty candidate in a fixed
//! order: its source work, then that work's parent (the work an edition or translation renders),
//! then the recipe's own metadata as the last-resort default.

use serde::Serialize;

use crate::dataset::{non_empty, Dataset, Recipe, Work};

/// Where a candidate value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Source {
    Recipe,
    Work,
    ParentWork,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InheritedField {
    Author,
    Date,
    Language,
    Place,
}

impl InheritedField {
    pub const ALL: [InheritedField; 4] = [
        InheritedField::Author,
        InheritedField::Date,
        InheritedField::Language,
        InheritedField::Place,
    ];
}

/// First non-empty value wins.
pub fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates.into_iter().find_map(non_empty)
}

/// The ordered sources a recipe inherits from.
#[derive(Debug, Clone)]
pub struct InheritanceChain<'a> {
    recipe: &'a Recipe,
    work: Option<&'a Work>,
    parent: Option<&'a Work>,
}

impl<'a> InheritanceChain<'a> {
    pub fn for_recipe(recipe: &'a Recipe, dataset: &'a Dataset) -> Self {
        let work = recipe
            .metadata
            .source_work_id
            .as_deref()
            .and_then(|id| dataset.work(id));
        if recipe.metadata.source_work_id.is_some() && work.is_none() {
            tracing::debug!(
                "[InheritanceChain] recipe {} references missing work {:?}",
                recipe.id,
                recipe.metadata.source_work_id
            );
        }
        let parent = work
            .and_then(|w| w.parent_id.as_deref())
            .and_then(|id| dataset.work(id));
        InheritanceChain {
            recipe,
            work,
            parent,
        }
    }

    /// Candidates for `field` in precedence order.
    pub fn candidates(&self, field: InheritedField) -> Vec<(Source, Option<&'a str>)> {
        let pick = |w: &'a Work| match field {
            InheritedField::Author => w.author.as_deref(),
            InheritedField::Date => w.date.as_deref(),
            InheritedField::Language => w.language.as_deref(),
            InheritedField::Place => w.place.as_deref(),
        };
        let meta = &self.recipe.metadata;
        let own = match field {
            InheritedField::Author => meta.author.as_deref(),
            InheritedField::Date => meta.date.as_deref(),
            InheritedField::Language => meta.language.as_deref(),
            InheritedField::Place => meta.place.as_deref(),
        };
        vec![
            (Source::Work, self.work.and_then(pick)),
            (Source::ParentWork, self.parent.and_then(pick)),
            (Source::Recipe, own),
        ]
    }

    pub fn value(&self, field: InheritedField) -> Option<&'a str> {
        first_non_empty(self.candidates(field).into_iter().map(|(_, value)| value))
    }

    /// Which candidate supplied [InheritanceChain::value].
    pub fn source(&self, field: InheritedField) -> Option<Source> {
        self.candidates(field)
            .into_iter()
            .find(|(_, value)| non_empty(*value).is_some())
            .map(|(source, _)| source)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedMetadata {
    pub author: Option<String>,
    pub date: Option<String>,
    pub language: Option<String>,
    pub place: Option<String>,
}

pub fn resolve_recipe_metadata(recipe: &Recipe, dataset: &Dataset) -> ResolvedMetadata {
    let chain = InheritanceChain::for_recipe(recipe, dataset);
    let get = |field| chain.value(field).map(str::to_string);
    ResolvedMetadata {
        author: get(InheritedField::Author),
        date: get(InheritedField::Date),
        language: get(InheritedField::Language),
        place: get(InheritedField::Place),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::sample_dataset;
    use test_log::test;

    #[test]
    fn test_first_non_empty() {
        assert_eq!(first_non_empty([None, Some(""), Some(" "), Some("b")]), Some("b"));
        assert_eq!(first_non_empty([None, None]), None);
    }

    #[test]
    fn recipe_metadata_inherits_through_work_and_parent() {
        let ds = sample_dataset();
        // r-rose-perfume points at the translation w-dioscorides-beck, whose parent carries
        // author and language; the translation carries its own date.
        let recipe = ds.recipe("r-rose-perfume").unwrap();
        let resolved = resolve_recipe_metadata(recipe, &ds);
        assert_eq!(resolved.author.as_deref(), Some("Dioscorides"));
        assert_eq!(resolved.date.as_deref(), Some("2005"));
        assert_eq!(resolved.language.as_deref(), Some("Greek"));
        assert_eq!(resolved.place.as_deref(), Some("Anazarbus"));

        let chain = InheritanceChain::for_recipe(recipe, &ds);
        assert_eq!(chain.source(InheritedField::Author), Some(Source::ParentWork));
        assert_eq!(chain.source(InheritedField::Date), Some(Source::Work));
        assert_eq!(chain.source(InheritedField::Place), Some(Source::Recipe));
    }

    #[test]
    fn recipe_metadata_is_the_last_resort() {
        let mut ds = sample_dataset();
        let recipe = ds.recipes.iter_mut().find(|r| r.id == "r-rose-perfume").unwrap();
        recipe.metadata.date = Some("recipe-default".to_string());
        recipe.metadata.author = Some("Anonymous".to_string());
        let recipe = ds.recipe("r-rose-perfume").unwrap();
        let resolved = resolve_recipe_metadata(recipe, &ds);
        assert_eq!(resolved.date.as_deref(), Some("2005"));
        assert_eq!(resolved.author.as_deref(), Some("Dioscorides"));

        // A recipe with no source work keeps its own values.
        let mut orphan = recipe.clone();
        orphan.metadata.source_work_id = None;
        let resolved = resolve_recipe_metadata(&orphan, &ds);
        assert_eq!(resolved.date.as_deref(), Some("recipe-default"));
        let sources: Vec<Source> = InheritanceChain::for_recipe(&orphan, &ds)
            .candidates(InheritedField::Date)
            .into_iter()
            .map(|(source, _)| source)
            .collect();
        assert_eq!(sources, vec![Source::Work, Source::ParentWork, Source::Recipe]);
    }

    #[test]
    fn missing_work_leaves_only_recipe_values() {
        let mut ds = sample_dataset();
        ds.recipes[0].metadata.source_work_id = Some("w-gone".to_string());
        let recipe = &ds.recipes[0];
        let chain = InheritanceChain::for_recipe(recipe, &ds);
        for field in InheritedField::ALL {
            let candidates = chain.candidates(field);
            assert_eq!(candidates.len(), 3);
            assert_eq!(candidates[0].1, None);
            assert_eq!(candidates[1].1, None);
        }
    }
}
