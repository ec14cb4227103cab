//! In-memory application state for the admin console.
//!
//! The dataset is never mutated in place: every edit is a [DatasetAction] fed through [reduce],
//! which returns a new document. [AppState] holds the current document behind an [Arc] so readers
//! (breadcrumbs, listings) can keep a snapshot while an edit is applied.

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    sync::Arc,
};

use crate::{
    dataset::{
        AncientIngredient, Dataset, Identification, MasterEntity, Pins, Recipe, WorkshopKind,
    },
    error::AosError,
};

/// Edits the admin console can make to the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DatasetAction {
    /// Insert a recipe, or replace the one with the same id
    UpsertRecipe(Recipe),
    DeleteRecipe(String),
    /// Insert or replace an ingredient/tool/process master record
    UpsertMaster(WorkshopKind, MasterEntity),
    DeleteMaster(WorkshopKind, String),
    /// Pin a recipe item to an ancient term: (recipe id, item id, ancient term id)
    SetPin(String, String, String),
    /// Remove the pin for (recipe id, item id)
    ClearPin(String, String),
    UpsertAncientIngredient(AncientIngredient),
    UpsertIdentification(Identification),
    DeleteIdentification(String),
    /// Swap in a whole new document (import)
    Replace(Box<Dataset>),
}

impl Display for DatasetAction {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            DatasetAction::UpsertRecipe(r) => write!(f, "UpsertRecipe({})", r.id),
            DatasetAction::DeleteRecipe(id) => write!(f, "DeleteRecipe({id})"),
            DatasetAction::UpsertMaster(kind, m) => write!(f, "UpsertMaster({kind}:{})", m.id),
            DatasetAction::DeleteMaster(kind, id) => write!(f, "DeleteMaster({kind}:{id})"),
            DatasetAction::SetPin(recipe, item, term) => {
                write!(f, "SetPin({recipe}:{item} -> {term})")
            }
            DatasetAction::ClearPin(recipe, item) => write!(f, "ClearPin({recipe}:{item})"),
            DatasetAction::UpsertAncientIngredient(a) => {
                write!(f, "UpsertAncientIngredient({})", a.id)
            }
            DatasetAction::UpsertIdentification(i) => write!(f, "UpsertIdentification({})", i.id),
            DatasetAction::DeleteIdentification(id) => write!(f, "DeleteIdentification({id})"),
            DatasetAction::Replace(ds) => write!(f, "Replace({} recipes)", ds.recipes.len()),
        }
    }
}

trait Keyed {
    fn key(&self) -> &str;
}

macro_rules! keyed {
    ($($t:ty),*) => {
        $(impl Keyed for $t {
            fn key(&self) -> &str {
                &self.id
            }
        })*
    };
}

keyed!(Recipe, MasterEntity, AncientIngredient, Identification);

fn upsert<T: Keyed>(items: &mut Vec<T>, item: T, what: &str) -> Result<(), AosError> {
    if item.key().trim().is_empty() {
        return Err(AosError::Custom(format!("cannot save {what} without an id")));
    }
    match items.iter_mut().find(|existing| existing.key() == item.key()) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
    Ok(())
}

fn delete<T: Keyed>(items: &mut Vec<T>, id: &str, what: &str) -> Result<(), AosError> {
    let before = items.len();
    items.retain(|item| item.key() != id);
    if items.len() == before {
        return Err(AosError::NotFound(format!("{what} {id}")));
    }
    Ok(())
}

/// Apply `action` to `dataset`, returning the edited copy.
pub fn reduce(dataset: &Dataset, action: DatasetAction) -> Result<Dataset, AosError> {
    let mut next = dataset.clone();
    match action {
        DatasetAction::UpsertRecipe(recipe) => upsert(&mut next.recipes, recipe, "recipe")?,
        DatasetAction::DeleteRecipe(id) => delete(&mut next.recipes, &id, "recipe")?,
        DatasetAction::UpsertMaster(kind, entity) => {
            upsert(next.masters_mut(kind), entity, kind.as_str())?
        }
        DatasetAction::DeleteMaster(kind, id) => delete(next.masters_mut(kind), &id, kind.as_str())?,
        DatasetAction::SetPin(recipe_id, item_id, term_id) => {
            if recipe_id.is_empty() || item_id.is_empty() || term_id.is_empty() {
                return Err(AosError::Custom(
                    "a pin needs a recipe id, an item id and an ancient term id".to_string(),
                ));
            }
            next.pins
                .recipe_item_to_ancient_term_id
                .insert(Pins::pin_key(&recipe_id, &item_id), term_id);
        }
        DatasetAction::ClearPin(recipe_id, item_id) => {
            let key = Pins::pin_key(&recipe_id, &item_id);
            if next.pins.recipe_item_to_ancient_term_id.remove(&key).is_none() {
                return Err(AosError::NotFound(format!("pin {key}")));
            }
        }
        DatasetAction::UpsertAncientIngredient(term) => {
            upsert(&mut next.ancient_ingredients, term, "ancient term")?
        }
        DatasetAction::UpsertIdentification(ident) => {
            upsert(&mut next.identifications, ident, "identification")?
        }
        DatasetAction::DeleteIdentification(id) => {
            delete(&mut next.identifications, &id, "identification")?
        }
        DatasetAction::Replace(dataset) => next = *dataset,
    }
    Ok(next)
}

/// The current document plus whether it has unsaved edits.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    dataset: Arc<Dataset>,
    dirty: bool,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        AppState {
            dataset: Arc::new(dataset),
            dirty: false,
        }
    }

    pub fn dataset(&self) -> Arc<Dataset> {
        self.dataset.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Apply `action`. On error the state is left untouched.
    pub fn dispatch(&mut self, action: DatasetAction) -> Result<(), AosError> {
        tracing::debug!("[AppState::dispatch] {action}");
        let replacing = matches!(action, DatasetAction::Replace(_));
        let next = reduce(&self.dataset, action).inspect_err(|e| {
            tracing::warn!("[AppState::dispatch] rejected: {e}");
        })?;
        self.dataset = Arc::new(next);
        // An import is a fresh document, not an unsaved edit.
        self.dirty = !replacing;
        Ok(())
    }

    /// Mark the current document as persisted.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}
