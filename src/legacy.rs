//! Deprecated route strings from the hardcoded-id version of the site.
//!
//! Each legacy route names an anchor record; it resolves to the canonical route only while that
//! anchor still exists in the current dataset. Two entries fall back to a listing page instead of
//! going unresolved when their detail page is gone.

use crate::{
    dataset::{
        Dataset, InterpretationKind, WorkshopKind, ANCIENT_INGREDIENTS, MASTER_INGREDIENTS,
        MASTER_PEOPLE, MASTER_PROCESSES, MASTER_TOOLS, MASTER_WORKS, RECIPES,
    },
    route::{Route, StaticPage},
};

/// Prefixes that mark a link route as un-migrated legacy content.
pub const LEGACY_PREFIXES: &[&str] = &[
    "recipe_",
    "ingredient_",
    "tool_",
    "process_",
    "work_",
    "person_",
    "ancient_term_",
    "identification_",
    "product_",
    "source_",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyEntry {
    pub legacy: &'static str,
    pub collection: &'static str,
    pub anchor_id: &'static str,
    /// Listing page shown when the anchor is gone; `None` means unresolved.
    pub fallback: Option<StaticPage>,
}

pub const LEGACY_ROUTES: &[LegacyEntry] = &[
    LegacyEntry {
        legacy: "recipe_rose",
        collection: RECIPES,
        anchor_id: "r-rose-perfume",
        fallback: Some(StaticPage::Archive),
    },
    LegacyEntry {
        legacy: "recipe_megaleion",
        collection: RECIPES,
        anchor_id: "r-megaleion",
        fallback: None,
    },
    LegacyEntry {
        legacy: "ingredient_myrrh",
        collection: MASTER_INGREDIENTS,
        anchor_id: "ing-myrrh",
        fallback: None,
    },
    LegacyEntry {
        legacy: "ingredient_rose_petals",
        collection: MASTER_INGREDIENTS,
        anchor_id: "ing-rose-petals",
        fallback: None,
    },
    LegacyEntry {
        legacy: "tool_mortar",
        collection: MASTER_TOOLS,
        anchor_id: "tool-mortar-pestle",
        fallback: None,
    },
    LegacyEntry {
        legacy: "process_steeping",
        collection: MASTER_PROCESSES,
        anchor_id: "proc-steeping",
        fallback: None,
    },
    LegacyEntry {
        legacy: "work_dioscorides",
        collection: MASTER_WORKS,
        anchor_id: "w-dioscorides-materia-medica",
        fallback: Some(StaticPage::Works),
    },
    LegacyEntry {
        legacy: "person_dioscorides",
        collection: MASTER_PEOPLE,
        anchor_id: "p-dioscorides",
        fallback: None,
    },
    LegacyEntry {
        legacy: "ancient_term_smyrna",
        collection: ANCIENT_INGREDIENTS,
        anchor_id: "at-smyrna",
        fallback: None,
    },
];

impl LegacyEntry {
    /// The canonical route for this entry's anchor.
    pub fn canonical(&self) -> Route {
        let id = self.anchor_id.to_string();
        match self.collection {
            RECIPES => Route::Recipe { id },
            MASTER_WORKS => Route::Work { id },
            MASTER_PEOPLE => Route::Person { id },
            MASTER_INGREDIENTS => Route::WorkshopEntity {
                kind: WorkshopKind::Ingredient,
                id,
            },
            MASTER_TOOLS => Route::WorkshopEntity {
                kind: WorkshopKind::Tool,
                id,
            },
            MASTER_PROCESSES => Route::WorkshopEntity {
                kind: WorkshopKind::Process,
                id,
            },
            _ => Route::Interpretation {
                kind: InterpretationKind::AncientTerm,
                id,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyResolution {
    /// Not one of the known legacy routes.
    NotLegacy,
    /// Anchor exists: the canonical route.
    Resolved(Route),
    /// Anchor is gone and the entry degrades to a listing page.
    Degraded(Route),
    /// Anchor is gone.
    Unresolved,
}

impl LegacyResolution {
    pub fn route(&self) -> Option<&Route> {
        match self {
            LegacyResolution::Resolved(route) | LegacyResolution::Degraded(route) => Some(route),
            LegacyResolution::NotLegacy | LegacyResolution::Unresolved => None,
        }
    }
}

pub fn legacy_entry(route: &str) -> Option<&'static LegacyEntry> {
    LEGACY_ROUTES.iter().find(|entry| entry.legacy == route)
}

pub fn is_legacy_route(route: &str) -> bool {
    LEGACY_PREFIXES.iter().any(|prefix| route.starts_with(prefix))
}

/// Map a deprecated route string to its canonical equivalent in `dataset`.
pub fn resolve_legacy(route: &str, dataset: &Dataset) -> LegacyResolution {
    let Some(entry) = legacy_entry(route) else {
        return LegacyResolution::NotLegacy;
    };
    if dataset.contains(entry.collection, entry.anchor_id) {
        let canonical = entry.canonical();
        tracing::debug!("[resolve_legacy] {route} -> {canonical}");
        return LegacyResolution::Resolved(canonical);
    }
    match entry.fallback {
        Some(page) => {
            tracing::warn!(
                "[resolve_legacy] anchor {} for {route} is missing from {}; showing {page}",
                entry.anchor_id,
                entry.collection
            );
            LegacyResolution::Degraded(Route::Page(page))
        }
        None => {
            tracing::warn!(
                "[resolve_legacy] anchor {} for {route} is missing from {}",
                entry.anchor_id,
                entry.collection
            );
            LegacyResolution::Unresolved
        }
    }
}
