//! The individual integrity checks. Each appends to the shared error list and never stops early.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::{
    curated::{CuratedField, CuratedTargetSource},
    index::{collections, entity_label, str_field, DocumentIndex},
    report::IntegrityError,
};
use crate::{
    dataset::{
        PersonCategory, ANCIENT_INGREDIENTS, IDENTIFICATIONS, INGREDIENT_PRODUCTS,
        MASTER_PEOPLE, MATERIAL_SOURCES, PINS, RECIPES,
    },
    legacy::is_legacy_route,
    route::{EntityIndex, Route},
};

fn records<'a>(root: &'a Map<String, Value>, collection: &str) -> &'a [Value] {
    root.get(collection)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Ids unique within each array-valued collection.
pub fn unique_ids(root: &Map<String, Value>, errors: &mut Vec<IntegrityError>) {
    for (collection, items) in collections(root) {
        let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
        for (pos, item) in items.iter().enumerate() {
            let Some(id) = str_field(item, "id") else {
                continue;
            };
            match seen.get(id) {
                Some(first) => errors.push(IntegrityError::new(
                    collection,
                    id,
                    "id",
                    format!("duplicate id (first used at {collection}[{first}])"),
                )),
                None => {
                    seen.insert(id, pos);
                }
            }
        }
    }
}

/// URNs unique across every collection; each later occurrence names the first holder.
pub fn unique_urns(root: &Map<String, Value>, errors: &mut Vec<IntegrityError>) {
    let mut seen: BTreeMap<&str, (&str, String)> = BTreeMap::new();
    for (collection, items) in collections(root) {
        for (pos, item) in items.iter().enumerate() {
            let Some(urn) = str_field(item, "urn") else {
                continue;
            };
            let label = entity_label(item, pos);
            match seen.get(urn) {
                Some((other_collection, other_id)) => errors.push(IntegrityError::new(
                    collection,
                    label,
                    "urn",
                    format!("duplicate urn \"{urn}\" (also used by {other_collection}:{other_id})"),
                )),
                None => {
                    seen.insert(urn, (collection, label));
                }
            }
        }
    }
}

/// Annotation markers in `text.combinedSegments` point into the recipe's own `annotations`.
pub fn annotation_segments(root: &Map<String, Value>, errors: &mut Vec<IntegrityError>) {
    for (pos, recipe) in records(root, RECIPES).iter().enumerate() {
        let recipe_id = entity_label(recipe, pos);
        let annotations = recipe.get("annotations").and_then(Value::as_object);
        let Some(segments) = recipe
            .pointer("/text/combinedSegments")
            .and_then(Value::as_array)
        else {
            continue;
        };
        for (seg_pos, segment) in segments.iter().enumerate() {
            if segment.get("type").and_then(Value::as_str) != Some("annotation") {
                continue;
            }
            let field = format!("text.combinedSegments[{seg_pos}].id");
            match str_field(segment, "id") {
                Some(id) if annotations.is_some_and(|a| a.contains_key(id)) => {}
                Some(id) => errors.push(IntegrityError::new(
                    RECIPES,
                    &recipe_id,
                    field,
                    format!("unresolved annotation id \"{id}\""),
                )),
                None => errors.push(IntegrityError::new(
                    RECIPES,
                    &recipe_id,
                    field,
                    "unresolved annotation id (segment has no id)",
                )),
            }
        }
    }
}

fn pinned_term<'a>(root: &'a Map<String, Value>, recipe_id: &str, item_id: &str) -> Option<(String, &'a str)> {
    let pins = root
        .get(PINS)?
        .get("recipeItemToAncientTermId")?
        .as_object()?;
    let scoped = format!("{recipe_id}:{item_id}");
    [scoped, item_id.to_string()].into_iter().find_map(|key| {
        pins.get(&key)
            .and_then(Value::as_str)
            .filter(|term| !term.trim().is_empty())
            .map(|term| (key, term))
    })
}

/// Ingredient items link to a known ancient term directly or through a pin.
pub fn ingredient_terms(
    root: &Map<String, Value>,
    index: &DocumentIndex,
    errors: &mut Vec<IntegrityError>,
) {
    for (pos, recipe) in records(root, RECIPES).iter().enumerate() {
        let recipe_id = entity_label(recipe, pos);
        let Some(items) = recipe.get("items").and_then(Value::as_array) else {
            continue;
        };
        for (item_pos, item) in items.iter().enumerate() {
            if item.get("type").and_then(Value::as_str) != Some("ingredient") {
                continue;
            }
            let item_id = str_field(item, "id");
            if let Some(term) = str_field(item, "ancientTermId") {
                if !index.contains(ANCIENT_INGREDIENTS, term) {
                    errors.push(IntegrityError::new(
                        RECIPES,
                        &recipe_id,
                        format!("items[{item_pos}].ancientTermId"),
                        format!("unresolved ancient term id \"{term}\""),
                    ));
                }
                continue;
            }
            match item_id.and_then(|id| pinned_term(root, &recipe_id, id)) {
                Some((_, term)) if index.contains(ANCIENT_INGREDIENTS, term) => {}
                Some((key, term)) => errors.push(IntegrityError::new(
                    RECIPES,
                    &recipe_id,
                    format!("{PINS}.recipeItemToAncientTermId.{key}"),
                    format!("unresolved pinned ancient term id \"{term}\""),
                )),
                None => errors.push(IntegrityError::new(
                    RECIPES,
                    &recipe_id,
                    format!("items[{item_pos}].ancientTermId"),
                    "ingredient has no ancient term (no ancientTermId and no pin)",
                )),
            }
        }
    }
}

/// Identification chains: required ancient term and product, optional material source.
pub fn identification_chains(
    root: &Map<String, Value>,
    index: &DocumentIndex,
    errors: &mut Vec<IntegrityError>,
) {
    const LINKS: [(&str, &str, bool); 3] = [
        ("ancientIngredientId", ANCIENT_INGREDIENTS, true),
        ("ingredientProductId", INGREDIENT_PRODUCTS, true),
        ("materialSourceId", MATERIAL_SOURCES, false),
    ];
    for (pos, ident) in records(root, IDENTIFICATIONS).iter().enumerate() {
        let ident_id = entity_label(ident, pos);
        for (field, collection, required) in LINKS {
            match str_field(ident, field) {
                Some(target) if index.contains(collection, target) => {}
                Some(target) => errors.push(IntegrityError::new(
                    IDENTIFICATIONS,
                    &ident_id,
                    field,
                    format!("unresolved {collection} id \"{target}\""),
                )),
                None if required => errors.push(IntegrityError::new(
                    IDENTIFICATIONS,
                    &ident_id,
                    field,
                    "missing required reference",
                )),
                None => {}
            }
        }
    }
}

/// Curated homepage routes and recipe slugs resolve against the document.
pub fn curated_targets(
    curated: &dyn CuratedTargetSource,
    index: &DocumentIndex,
    errors: &mut Vec<IntegrityError>,
) {
    for target in curated.targets() {
        let field = target.field.as_str();
        let reason = match target.field {
            CuratedField::RecipeSlug => {
                if index.has_recipe_slug(&target.value) {
                    continue;
                }
                format!("unknown recipe slug (line {})", target.line)
            }
            CuratedField::Route | CuratedField::RecipeRoute => {
                match Route::parse_link(&target.value) {
                    Some(route) if route.resolves(index) => continue,
                    Some(_) => format!("unresolved route target (line {})", target.line),
                    None => format!("invalid route (line {})", target.line),
                }
            }
        };
        errors.push(IntegrityError::new(
            curated.name(),
            &target.value,
            field,
            reason,
        ));
    }
}

/// People records carry their identity fields and only recognized category tags.
pub fn people(root: &Map<String, Value>, errors: &mut Vec<IntegrityError>) {
    for (pos, person) in records(root, MASTER_PEOPLE).iter().enumerate() {
        let person_id = entity_label(person, pos);
        for field in ["id", "urn", "slug"] {
            if str_field(person, field).is_none() {
                errors.push(IntegrityError::new(
                    MASTER_PEOPLE,
                    &person_id,
                    field,
                    "missing required field",
                ));
            }
        }
        if str_field(person, "displayName")
            .or_else(|| str_field(person, "name"))
            .is_none()
        {
            errors.push(IntegrityError::new(
                MASTER_PEOPLE,
                &person_id,
                "displayName",
                "missing displayName or name",
            ));
        }
        match person.get("categories") {
            None | Some(Value::Null) => {}
            Some(Value::Array(tags)) => {
                for (tag_pos, tag) in tags.iter().enumerate() {
                    if tag.as_str().and_then(PersonCategory::parse).is_none() {
                        errors.push(IntegrityError::new(
                            MASTER_PEOPLE,
                            &person_id,
                            format!("categories[{tag_pos}]"),
                            format!("unknown category {tag}"),
                        ));
                    }
                }
            }
            Some(_) => errors.push(IntegrityError::new(
                MASTER_PEOPLE,
                &person_id,
                "categories",
                "categories must be a list",
            )),
        }
    }
}

/// Why an annotation link route is rejected, if it is.
pub fn link_route_problem(route: &str, index: &dyn EntityIndex) -> Option<String> {
    let route = route.trim();
    if route.is_empty() {
        return Some("empty route".to_string());
    }
    if is_legacy_route(route) {
        return Some(format!("legacy route string \"{route}\""));
    }
    match Route::parse_link(route) {
        Some(parsed) if parsed.resolves(index) => None,
        Some(_) => Some(format!("unresolved route target \"{route}\"")),
        None => Some(format!("invalid route \"{route}\"")),
    }
}

/// Every annotation link route is a static page or a resolvable typed reference.
pub fn annotation_links(
    root: &Map<String, Value>,
    index: &DocumentIndex,
    errors: &mut Vec<IntegrityError>,
) {
    for (pos, recipe) in records(root, RECIPES).iter().enumerate() {
        let recipe_id = entity_label(recipe, pos);
        let Some(annotations) = recipe.get("annotations").and_then(Value::as_object) else {
            continue;
        };
        for (annotation_id, annotation) in annotations {
            let Some(links) = annotation.get("links").and_then(Value::as_array) else {
                continue;
            };
            for (link_pos, link) in links.iter().enumerate() {
                let route = link.get("route").and_then(Value::as_str).unwrap_or_default();
                if let Some(reason) = link_route_problem(route, index) {
                    errors.push(IntegrityError::new(
                        RECIPES,
                        &recipe_id,
                        format!("annotations.{annotation_id}.links[{link_pos}].route"),
                        reason,
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::sample_document;
    use serde_json::json;
    use test_log::test;

    #[test]
    fn link_route_rules() {
        let doc = sample_document();
        let index = DocumentIndex::build(doc.as_object().unwrap());
        assert_eq!(link_route_problem("recipe:r-rose-perfume", &index), None);
        assert_eq!(link_route_problem("archive", &index), None);
        assert_eq!(link_route_problem("interpretation:ancient-term:at-rhodon", &index), None);
        assert_eq!(link_route_problem("workshop-entity:tool:tool-mortar-pestle", &index), None);
        assert_eq!(link_route_problem("  ", &index).as_deref(), Some("empty route"));
        assert!(link_route_problem("recipe_rose", &index)
            .unwrap()
            .starts_with("legacy route string"));
        assert!(link_route_problem("source_rosa", &index)
            .unwrap()
            .starts_with("legacy route string"));
        assert!(link_route_problem("recipe:r-gone", &index)
            .unwrap()
            .starts_with("unresolved route target"));
        assert!(link_route_problem("docs:guide", &index)
            .unwrap()
            .starts_with("invalid route"));
        assert!(link_route_problem("library", &index)
            .unwrap()
            .starts_with("invalid route"));
    }

    #[test]
    fn pins_prefer_scoped_key() {
        let doc = json!({
            "pins": {"recipeItemToAncientTermId": {"r1:i1": "at-a", "i1": "at-b", "i2": " "}}
        });
        let root = doc.as_object().unwrap();
        assert_eq!(
            pinned_term(root, "r1", "i1"),
            Some(("r1:i1".to_string(), "at-a"))
        );
        assert_eq!(pinned_term(root, "r2", "i1"), Some(("i1".to_string(), "at-b")));
        assert_eq!(pinned_term(root, "r1", "i2"), None);

        let blank_scoped = json!({
            "pins": {"recipeItemToAncientTermId": {"r1:i1": "", "i1": "at-b"}}
        });
        assert_eq!(
            pinned_term(blank_scoped.as_object().unwrap(), "r1", "i1"),
            Some(("i1".to_string(), "at-b"))
        );
    }

    #[test]
    fn people_fields_and_categories() {
        let doc = json!({
            "masterPeople": [
                {"id": "p1", "urn": "u1", "slug": "s1", "name": "A", "categories": ["team", "sage"]},
                {"id": "p2", "urn": "u2", "slug": "", "categories": "team"},
            ]
        });
        let mut errors = Vec::new();
        people(doc.as_object().unwrap(), &mut errors);
        let found: Vec<(&str, &str)> = errors
            .iter()
            .map(|e| (e.entity_id.as_str(), e.field.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("p1", "categories[1]"),
                ("p2", "slug"),
                ("p2", "displayName"),
                ("p2", "categories"),
            ]
        );
    }
}
