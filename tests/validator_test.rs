//! End-to-end integrity checks over the fixture dataset and curated content.
mod common;

use aos_core::validate::{validate, validate_files, IntegrityError, RegexCuratedSource};
use common::{fixture_document, fixture_path, write_dataset};
use serde_json::{json, Value};
use test_log::test;

fn curated() -> RegexCuratedSource {
    RegexCuratedSource::from_path(fixture_path("curated.ts")).unwrap()
}

fn set_links(doc: &mut Value, routes: &[&str]) {
    let links: Vec<Value> = routes
        .iter()
        .map(|route| json!({"label": "link", "route": route}))
        .collect();
    doc["recipes"][0]["annotations"]["a-schoinos"]["links"] = Value::Array(links);
}

#[test]
fn fixture_files_validate_clean() {
    let errors = validate_files(fixture_path("dataset.json"), fixture_path("curated.ts"));
    assert_eq!(errors, Vec::<IntegrityError>::new());
}

#[test]
fn shared_urn_between_people_is_one_error() {
    let doc = json!({
        "masterPeople": [
            {"id": "p1", "urn": "urn:aos:person:x", "slug": "x", "displayName": "A"},
            {"id": "p2", "urn": "urn:aos:person:x", "slug": "x2", "displayName": "B"},
        ]
    });
    let errors = validate(&doc, None);
    assert_eq!(errors.len(), 1);
    let err = &errors[0];
    assert_eq!(err.path, "masterPeople");
    assert_eq!(err.entity_id, "p2");
    assert_eq!(err.field, "urn");
    assert!(err.reason.contains("masterPeople:p1"), "{}", err.reason);
}

#[test]
fn each_redundant_urn_occurrence_is_reported() {
    let mut doc = fixture_document();
    let urn = "urn:aos:ingredient:myrrh";
    for (collection, id) in [
        ("masterTools", "tool-x"),
        ("materialSources", "ms-x"),
    ] {
        doc[collection]
            .as_array_mut()
            .unwrap()
            .push(json!({"id": id, "slug": id, "urn": urn, "name": id}));
    }
    let errors = validate(&doc, Some(&curated()));
    let urn_errors: Vec<&IntegrityError> = errors.iter().filter(|e| e.field == "urn").collect();
    assert_eq!(urn_errors.len(), 2);
    for err in urn_errors {
        assert!(err.reason.contains("masterIngredients:ing-myrrh"));
    }
}

#[test]
fn legacy_and_unresolved_link_routes() {
    let mut doc = fixture_document();
    set_links(&mut doc, &["recipe_rose", "recipe:r-rose-perfume"]);
    let errors = validate(&doc, Some(&curated()));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].reason, "legacy route string \"recipe_rose\"");
    assert_eq!(errors[0].entity_id, "r-rose-perfume");

    // Link to the rose perfume from the other recipe, then drop the rose perfume.
    doc["recipes"][1]["annotations"] = json!({
        "a1": {"term": "t", "definition": "d", "links": [{"route": "recipe:r-rose-perfume"}]}
    });
    doc["recipes"].as_array_mut().unwrap().remove(0);
    let errors = validate(&doc, None);
    let reasons: Vec<&str> = errors.iter().map(|e| e.reason.as_str()).collect();
    assert!(
        reasons.contains(&"unresolved route target \"recipe:r-rose-perfume\""),
        "{reasons:?}"
    );
}

#[test]
fn link_route_aliases_resolve_against_their_collections() {
    let mut doc = fixture_document();
    set_links(
        &mut doc,
        &[
            "interpretation:identification:id-rhodon-rose",
            "identification:id-rhodon-rose",
            "ingredient-product:ip-myrrh-resin",
            "material-source:ms-rosa-gallica",
            "workshop-entity:process:proc-steeping",
            "workshop-process:proc-steeping",
            "work:w-theophrastus-odours",
            "ancient-terms",
            "interpretation:identification:ms-rosa-gallica",
            "workshop-entity:tool:ing-myrrh",
        ],
    );
    let errors = validate(&doc, Some(&curated()));
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(
        fields,
        vec![
            "annotations.a-schoinos.links[8].route",
            "annotations.a-schoinos.links[9].route",
        ]
    );
}

#[test]
fn unresolved_annotation_id_is_scoped_to_its_recipe() {
    let mut doc = fixture_document();
    // a-schoinos exists on the other recipe only.
    doc["recipes"][1]["text"]["combinedSegments"] =
        json!([{"type": "annotation", "id": "a-schoinos"}]);
    let errors = validate(&doc, Some(&curated()));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].entity_id, "r-megaleion");
    assert_eq!(errors[0].reason, "unresolved annotation id \"a-schoinos\"");
}

#[test]
fn repeated_runs_are_identical() {
    let mut doc = fixture_document();
    set_links(&mut doc, &["recipe_rose", "person:nobody", "???"]);
    doc["masterPeople"][0]["categories"] = json!(["alumni", "wizard"]);
    doc["identifications"][1]["materialSourceId"] = json!("ms-none");
    let first = validate(&doc, Some(&curated()));
    let second = validate(&doc, Some(&curated()));
    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
    let lines: Vec<String> = first.iter().map(ToString::to_string).collect();
    assert!(lines.iter().all(|line| line.split('\t').count() == 4));
}

#[test]
fn missing_curated_file_is_skipped_but_missing_dataset_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_dataset(&dir, &fixture_document());
    let errors = validate_files(&dataset, dir.path().join("no-such-curated.ts"));
    assert!(errors.is_empty());

    let errors = validate_files(dir.path().join("no-such-dataset.json"), fixture_path("curated.ts"));
    assert_eq!(errors.len(), 1);
    assert!(errors[0].reason.starts_with("cannot read dataset"));
}
