//! The typed dataset document.
//!
//! The whole site is one JSON document: a handful of named top-level collections (recipes and the
//! master ingredient/tool/process/work/person records), the workshop interpretation chain
//! (ancient terms, identifications, ingredient products, material sources) and the `pins`
//! side-table. The document is always read and written wholesale.
//!
//! Every record keeps unknown fields in a flattened `extra` map so that an import followed by an
//! export never drops data this crate does not model.

use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    fs::{read_to_string, rename, write},
    path::Path,
};

use crate::error::AosError;

pub const RECIPES: &str = "recipes";
pub const MASTER_INGREDIENTS: &str = "masterIngredients";
pub const MASTER_TOOLS: &str = "masterTools";
pub const MASTER_PROCESSES: &str = "masterProcesses";
pub const MASTER_WORKS: &str = "masterWorks";
pub const MASTER_PEOPLE: &str = "masterPeople";
pub const ANCIENT_INGREDIENTS: &str = "ancientIngredients";
pub const IDENTIFICATIONS: &str = "identifications";
pub const INGREDIENT_PRODUCTS: &str = "ingredientProducts";
pub const MATERIAL_SOURCES: &str = "materialSources";
pub const PINS: &str = "pins";

/// Master entity kinds surfaced in the workshop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkshopKind {
    Ingredient,
    Tool,
    Process,
}

impl WorkshopKind {
    pub const ALL: [WorkshopKind; 3] = [
        WorkshopKind::Ingredient,
        WorkshopKind::Tool,
        WorkshopKind::Process,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkshopKind::Ingredient => "ingredient",
            WorkshopKind::Tool => "tool",
            WorkshopKind::Process => "process",
        }
    }

    pub fn parse(s: &str) -> Option<WorkshopKind> {
        WorkshopKind::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// The top-level collection holding master records of this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            WorkshopKind::Ingredient => MASTER_INGREDIENTS,
            WorkshopKind::Tool => MASTER_TOOLS,
            WorkshopKind::Process => MASTER_PROCESSES,
        }
    }
}

impl Display for WorkshopKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four links of the interpretation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterpretationKind {
    AncientTerm,
    Identification,
    IngredientProduct,
    MaterialSource,
}

impl InterpretationKind {
    pub const ALL: [InterpretationKind; 4] = [
        InterpretationKind::AncientTerm,
        InterpretationKind::Identification,
        InterpretationKind::IngredientProduct,
        InterpretationKind::MaterialSource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterpretationKind::AncientTerm => "ancient-term",
            InterpretationKind::Identification => "identification",
            InterpretationKind::IngredientProduct => "ingredient-product",
            InterpretationKind::MaterialSource => "material-source",
        }
    }

    pub fn parse(s: &str) -> Option<InterpretationKind> {
        InterpretationKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
    }

    pub fn collection(&self) -> &'static str {
        match self {
            InterpretationKind::AncientTerm => ANCIENT_INGREDIENTS,
            InterpretationKind::Identification => IDENTIFICATIONS,
            InterpretationKind::IngredientProduct => INGREDIENT_PRODUCTS,
            InterpretationKind::MaterialSource => MATERIAL_SOURCES,
        }
    }
}

impl Display for InterpretationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allowed `masterPeople[].categories` tags.
#[derive(EnumSetType, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonCategory {
    Historical,
    Team,
    Collaborator,
    Alumni,
}

impl PersonCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonCategory::Historical => "historical",
            PersonCategory::Team => "team",
            PersonCategory::Collaborator => "collaborator",
            PersonCategory::Alumni => "alumni",
        }
    }

    pub fn parse(s: &str) -> Option<PersonCategory> {
        EnumSet::<PersonCategory>::all()
            .iter()
            .find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_work_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One entry of `text.combinedSegments`: plain text or an annotation marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Segment {
    pub fn text(text: &str) -> Segment {
        Segment {
            kind: "text".to_string(),
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn annotation(id: &str) -> Segment {
        Segment {
            kind: "annotation".to_string(),
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    pub fn is_annotation(&self) -> bool {
        self.kind == "annotation"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub combined_segments: Vec<Segment>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub route: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub links: Vec<AnnotationLink>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Ingredient,
    Tool,
    Process,
    #[serde(other)]
    Other,
}

/// An ingredient/tool/process occurrence inside a recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeItem {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancient_term_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub urn: String,
    #[serde(default)]
    pub metadata: RecipeMetadata,
    #[serde(default)]
    pub text: RecipeText,
    #[serde(default)]
    pub annotations: BTreeMap<String, Annotation>,
    #[serde(default)]
    pub items: Vec<RecipeItem>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Recipe {
    pub fn item(&self, item_id: &str) -> Option<&RecipeItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

/// Master ingredient, tool or process record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterEntity {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub urn: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl MasterEntity {
    pub fn label(&self) -> Option<&str> {
        non_empty(self.display_name.as_deref()).or_else(|| non_empty(Some(self.name.as_str())))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub urn: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    /// Editions and translations point at the work they render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Work {
    pub fn label(&self) -> Option<&str> {
        non_empty(Some(self.name.as_str())).or_else(|| non_empty(self.title.as_deref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub urn: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Person {
    pub fn label(&self) -> Option<&str> {
        non_empty(self.display_name.as_deref()).or_else(|| non_empty(Some(self.name.as_str())))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AncientIngredient {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub urn: String,
    #[serde(default)]
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AncientIngredient {
    pub fn label(&self) -> Option<&str> {
        non_empty(self.display_term.as_deref())
            .or_else(|| non_empty(Some(self.term.as_str())))
            .or_else(|| non_empty(self.transliteration.as_deref()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Established,
    Probable,
    Possible,
    Speculative,
    #[default]
    #[serde(other)]
    Unspecified,
}

/// A scholarly claim that an ancient term denotes a modern ingredient product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identification {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub urn: String,
    #[serde(default)]
    pub ancient_ingredient_id: String,
    #[serde(default)]
    pub ingredient_product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_source_id: Option<String>,
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientProduct {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub urn: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub urn: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pins {
    /// `<recipeId>:<itemId>` (or bare `<itemId>`) to ancient-term id.
    #[serde(default)]
    pub recipe_item_to_ancient_term_id: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Pins {
    pub fn pin_key(recipe_id: &str, item_id: &str) -> String {
        format!("{recipe_id}:{item_id}")
    }

    /// Scoped key first, bare item id second. Blank values are skipped.
    pub fn lookup(&self, recipe_id: &str, item_id: &str) -> Option<&str> {
        let scoped = Pins::pin_key(recipe_id, item_id);
        let found = [scoped.as_str(), item_id].into_iter().find_map(|key| {
            non_blank(self.recipe_item_to_ancient_term_id.get(key).map(String::as_str))
        });
        found
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub master_ingredients: Vec<MasterEntity>,
    #[serde(default)]
    pub master_tools: Vec<MasterEntity>,
    #[serde(default)]
    pub master_processes: Vec<MasterEntity>,
    #[serde(default)]
    pub master_works: Vec<Work>,
    #[serde(default)]
    pub master_people: Vec<Person>,
    #[serde(default)]
    pub ancient_ingredients: Vec<AncientIngredient>,
    #[serde(default)]
    pub identifications: Vec<Identification>,
    #[serde(default)]
    pub ingredient_products: Vec<IngredientProduct>,
    #[serde(default)]
    pub material_sources: Vec<MaterialSource>,
    #[serde(default)]
    pub pins: Pins,
    /// Collections and settings this crate does not model.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Dataset {
    pub fn from_json_str(content: &str) -> Result<Dataset, AosError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, AosError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Dataset, AosError> {
        tracing::debug!("Loading dataset from {:?}", path.as_ref());
        let content = read_to_string(path)?;
        Dataset::from_json_str(&content)
    }

    /// Writes the document next to `path` and renames it into place.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AosError> {
        let path = path.as_ref();
        let tmp = path.with_extension("json.tmp");
        tracing::debug!("Saving dataset to {:?} via {:?}", path, tmp);
        write(&tmp, self.to_json_pretty()?)?;
        rename(&tmp, path)?;
        Ok(())
    }

    pub fn import(json: &str) -> Result<Dataset, AosError> {
        Dataset::from_json_str(json)
    }

    pub fn export(&self) -> Result<String, AosError> {
        self.to_json_pretty()
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn masters(&self, kind: WorkshopKind) -> &[MasterEntity] {
        match kind {
            WorkshopKind::Ingredient => &self.master_ingredients,
            WorkshopKind::Tool => &self.master_tools,
            WorkshopKind::Process => &self.master_processes,
        }
    }

    pub fn masters_mut(&mut self, kind: WorkshopKind) -> &mut Vec<MasterEntity> {
        match kind {
            WorkshopKind::Ingredient => &mut self.master_ingredients,
            WorkshopKind::Tool => &mut self.master_tools,
            WorkshopKind::Process => &mut self.master_processes,
        }
    }

    pub fn master(&self, kind: WorkshopKind, id: &str) -> Option<&MasterEntity> {
        self.masters(kind).iter().find(|m| m.id == id)
    }

    pub fn work(&self, id: &str) -> Option<&Work> {
        self.master_works.iter().find(|w| w.id == id)
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.master_people.iter().find(|p| p.id == id)
    }

    pub fn ancient_ingredient(&self, id: &str) -> Option<&AncientIngredient> {
        self.ancient_ingredients.iter().find(|a| a.id == id)
    }

    pub fn identification(&self, id: &str) -> Option<&Identification> {
        self.identifications.iter().find(|i| i.id == id)
    }

    pub fn ingredient_product(&self, id: &str) -> Option<&IngredientProduct> {
        self.ingredient_products.iter().find(|p| p.id == id)
    }

    pub fn material_source(&self, id: &str) -> Option<&MaterialSource> {
        self.material_sources.iter().find(|m| m.id == id)
    }

    /// Whether any record with `id` exists in the named top-level collection.
    pub fn contains(&self, collection: &str, id: &str) -> bool {
        match collection {
            RECIPES => self.recipe(id).is_some(),
            MASTER_INGREDIENTS => self.master(WorkshopKind::Ingredient, id).is_some(),
            MASTER_TOOLS => self.master(WorkshopKind::Tool, id).is_some(),
            MASTER_PROCESSES => self.master(WorkshopKind::Process, id).is_some(),
            MASTER_WORKS => self.work(id).is_some(),
            MASTER_PEOPLE => self.person(id).is_some(),
            ANCIENT_INGREDIENTS => self.ancient_ingredient(id).is_some(),
            IDENTIFICATIONS => self.identification(id).is_some(),
            INGREDIENT_PRODUCTS => self.ingredient_product(id).is_some(),
            MATERIAL_SOURCES => self.material_source(id).is_some(),
            _ => false,
        }
    }

    /// The ancient term an item is linked to, directly or through a pin.
    pub fn pinned_term<'a>(&'a self, recipe_id: &str, item: &'a RecipeItem) -> Option<&'a str> {
        non_blank(item.ancient_term_id.as_deref())
            .or_else(|| self.pins.lookup(recipe_id, &item.id))
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Like [non_empty] but keeps the value as written; ids are compared verbatim.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const SAMPLE: &str = r#"{
        "recipes": [{
            "id": "r1",
            "slug": "rose-oil-dioscorides",
            "urn": "urn:aos:recipe:rose-oil-dioscorides",
            "metadata": { "title": "Rose oil", "sourceWorkId": "w1", "folio": "12r" },
            "text": {
                "combinedSegments": [
                    { "type": "text", "text": "Take " },
                    { "type": "annotation", "id": "a1", "text": "schoinos" },
                    { "type": "image", "src": "x.png" }
                ]
            },
            "annotations": { "a1": { "term": "schoinos", "definition": "rush", "links": [] } },
            "items": [{ "id": "i1", "type": "ingredient", "displayTerm": "rush" }]
        }],
        "masterWorks": [{ "id": "w1", "name": "De materia medica" }],
        "pins": { "recipeItemToAncientTermId": { "r1:i1": "at-schoinos", "i2": "at-other" } },
        "siteSettings": { "theme": "dark" }
    }"#;

    #[test]
    fn parses_document_and_keeps_unknown_fields() {
        let ds = Dataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(ds.recipes.len(), 1);
        let recipe = ds.recipe("r1").unwrap();
        assert_eq!(recipe.metadata.source_work_id.as_deref(), Some("w1"));
        assert!(recipe.metadata.extra.contains_key("folio"));
        assert!(recipe.text.combined_segments[1].is_annotation());
        assert!(recipe.text.combined_segments[2].extra.contains_key("src"));
        assert!(ds.extra.contains_key("siteSettings"));
        assert!(ds.contains(MASTER_WORKS, "w1"));
        assert!(!ds.contains("nonsense", "w1"));
    }

    #[test]
    fn pins_prefer_scoped_key_then_bare_item() {
        let ds = Dataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(ds.pins.lookup("r1", "i1"), Some("at-schoinos"));
        assert_eq!(ds.pins.lookup("r9", "i2"), Some("at-other"));
        assert_eq!(ds.pins.lookup("r9", "i1"), None);

        let recipe = ds.recipe("r1").unwrap();
        let mut item = recipe.items[0].clone();
        assert_eq!(ds.pinned_term("r1", &item), Some("at-schoinos"));
        item.ancient_term_id = Some("at-direct".to_string());
        assert_eq!(ds.pinned_term("r1", &item), Some("at-direct"));
    }

    #[test]
    fn blank_scoped_pin_falls_back_to_bare_item() {
        let mut ds = Dataset::from_json_str(SAMPLE).unwrap();
        let pins = &mut ds.pins.recipe_item_to_ancient_term_id;
        pins.insert("r1:i1".to_string(), "".to_string());
        pins.insert("i1".to_string(), "at-a".to_string());
        assert_eq!(ds.pins.lookup("r1", "i1"), Some("at-a"));

        let mut item = ds.recipe("r1").unwrap().items[0].clone();
        item.ancient_term_id = Some("  ".to_string());
        assert_eq!(ds.pinned_term("r1", &item), Some("at-a"));

        ds.pins.recipe_item_to_ancient_term_id.insert("i1".to_string(), " ".to_string());
        assert_eq!(ds.pins.lookup("r1", "i1"), None);
        assert_eq!(ds.pinned_term("r1", &item), None);
    }

    #[test]
    fn save_and_load_round_trip_the_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        let ds = Dataset::from_json_str(SAMPLE).unwrap();
        ds.save(&path).unwrap();
        let reloaded = Dataset::load(&path).unwrap();
        assert_eq!(ds, reloaded);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
