use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

use crate::{dataset::RECIPES, route::EntityIndex};

/// Ids of every array-valued top-level collection of a raw dataset document, plus recipe slugs.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex<'a> {
    ids: BTreeMap<&'a str, BTreeSet<&'a str>>,
    recipe_slugs: BTreeSet<&'a str>,
}

impl<'a> DocumentIndex<'a> {
    pub fn build(root: &'a Map<String, Value>) -> Self {
        let mut index = DocumentIndex::default();
        for (collection, items) in collections(root) {
            let ids = index.ids.entry(collection).or_default();
            for item in items {
                if let Some(id) = str_field(item, "id") {
                    ids.insert(id);
                }
            }
        }
        if let Some(recipes) = root.get(RECIPES).and_then(Value::as_array) {
            index.recipe_slugs = recipes
                .iter()
                .filter_map(|recipe| str_field(recipe, "slug"))
                .collect();
        }
        index
    }

    pub fn has_recipe_slug(&self, slug: &str) -> bool {
        self.recipe_slugs.contains(slug)
    }
}

impl EntityIndex for DocumentIndex<'_> {
    fn contains(&self, collection: &str, id: &str) -> bool {
        self.ids
            .get(collection)
            .is_some_and(|ids| ids.contains(id))
    }
}

/// Array-valued top-level keys, in sorted key order.
pub(crate) fn collections(
    root: &Map<String, Value>,
) -> impl Iterator<Item = (&str, &Vec<Value>)> {
    root.iter()
        .filter_map(|(key, value)| value.as_array().map(|items| (key.as_str(), items)))
}

/// A string field of a JSON object, as written. All-blank values count as absent.
pub(crate) fn str_field<'v>(value: &'v Value, key: &str) -> Option<&'v str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// The id used to name a record in error output: its id, or its position when it has none.
pub(crate) fn entity_label(item: &Value, position: usize) -> String {
    str_field(item, "id")
        .map(str::to_string)
        .unwrap_or_else(|| format!("[{position}]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_log::test;

    #[test]
    fn indexes_arrays_only() {
        let doc = json!({
            "recipes": [{"id": "r1", "slug": "rose"}, {"id": " "}, {"slug": "lily"}],
            "masterTools": [{"id": "t1"}],
            "pins": {"recipeItemToAncientTermId": {"r1:i1": "at1"}},
        });
        let root = doc.as_object().unwrap();
        let index = DocumentIndex::build(root);
        assert!(index.contains("recipes", "r1"));
        assert!(!index.contains("recipes", " "));
        assert!(index.contains("masterTools", "t1"));
        assert!(!index.contains("pins", "r1:i1"));
        assert!(index.has_recipe_slug("lily"));
        assert_eq!(entity_label(&root["recipes"][2], 2), "[2]");
        assert_eq!(collections(root).count(), 2);
    }

    #[test]
    fn ids_are_compared_as_written() {
        let doc = json!({"ancientIngredients": [{"id": " at1"}, {"id": "at2"}]});
        let index = DocumentIndex::build(doc.as_object().unwrap());
        assert!(index.contains("ancientIngredients", " at1"));
        assert!(!index.contains("ancientIngredients", "at1"));
        assert_eq!(str_field(&doc["ancientIngredients"][0], "id"), Some(" at1"));
    }
}
