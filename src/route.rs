/// [crate::route] contains [Route], the typed navigation target, and the colon-delimited route
/// string grammar used in the address bar and in annotation links.
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::{
    dataset::{
        Dataset, InterpretationKind, WorkshopKind, MASTER_PEOPLE, MASTER_WORKS, RECIPES,
    },
    error::AosError,
};

/// Un-parameterized pages that are always valid navigation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaticPage {
    Home,
    About,
    Project,
    Team,
    News,
    Search,
    Archive,
    Workshop,
    Materials,
    Ingredients,
    Tools,
    Processes,
    Works,
    People,
    AncientTerms,
    Identifications,
    IngredientProducts,
    MaterialSources,
    Docs,
    Admin,
}

impl StaticPage {
    pub const ALL: [StaticPage; 20] = [
        StaticPage::Home,
        StaticPage::About,
        StaticPage::Project,
        StaticPage::Team,
        StaticPage::News,
        StaticPage::Search,
        StaticPage::Archive,
        StaticPage::Workshop,
        StaticPage::Materials,
        StaticPage::Ingredients,
        StaticPage::Tools,
        StaticPage::Processes,
        StaticPage::Works,
        StaticPage::People,
        StaticPage::AncientTerms,
        StaticPage::Identifications,
        StaticPage::IngredientProducts,
        StaticPage::MaterialSources,
        StaticPage::Docs,
        StaticPage::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaticPage::Home => "home",
            StaticPage::About => "about",
            StaticPage::Project => "project",
            StaticPage::Team => "team",
            StaticPage::News => "news",
            StaticPage::Search => "search",
            StaticPage::Archive => "archive",
            StaticPage::Workshop => "workshop",
            StaticPage::Materials => "materials",
            StaticPage::Ingredients => "ingredients",
            StaticPage::Tools => "tools",
            StaticPage::Processes => "processes",
            StaticPage::Works => "works",
            StaticPage::People => "people",
            StaticPage::AncientTerms => "ancient-terms",
            StaticPage::Identifications => "identifications",
            StaticPage::IngredientProducts => "ingredient-products",
            StaticPage::MaterialSources => "material-sources",
            StaticPage::Docs => "docs",
            StaticPage::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<StaticPage> {
        StaticPage::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// Listing page for a workshop master kind.
    pub fn for_workshop(kind: WorkshopKind) -> StaticPage {
        match kind {
            WorkshopKind::Ingredient => StaticPage::Ingredients,
            WorkshopKind::Tool => StaticPage::Tools,
            WorkshopKind::Process => StaticPage::Processes,
        }
    }

    /// Listing page for an interpretation-chain kind.
    pub fn for_interpretation(kind: InterpretationKind) -> StaticPage {
        match kind {
            InterpretationKind::AncientTerm => StaticPage::AncientTerms,
            InterpretationKind::Identification => StaticPage::Identifications,
            InterpretationKind::IngredientProduct => StaticPage::IngredientProducts,
            InterpretationKind::MaterialSource => StaticPage::MaterialSources,
        }
    }
}

impl Display for StaticPage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the leading segment of a route string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RouteScheme {
    Recipe,
    Person,
    Work,
    Interpretation(InterpretationKind),
    Workshop(WorkshopKind),
    WorkshopUnlinked,
    Docs,
    /// `interpretation:<kind>:<id>`, accepted in annotation links only
    InterpretationAlias,
    /// `workshop-entity:<kind>:<id>`, accepted in annotation links only
    WorkshopEntityAlias,
    Unknown,
}

impl From<&str> for RouteScheme {
    fn from(head: &str) -> Self {
        match head {
            "recipe" => RouteScheme::Recipe,
            "person" => RouteScheme::Person,
            "work" => RouteScheme::Work,
            "docs" => RouteScheme::Docs,
            "workshop-unlinked" => RouteScheme::WorkshopUnlinked,
            "interpretation" => RouteScheme::InterpretationAlias,
            "workshop-entity" => RouteScheme::WorkshopEntityAlias,
            _ => {
                if let Some(kind) = InterpretationKind::parse(head) {
                    RouteScheme::Interpretation(kind)
                } else if let Some(kind) = head
                    .strip_prefix("workshop-")
                    .and_then(WorkshopKind::parse)
                {
                    RouteScheme::Workshop(kind)
                } else {
                    RouteScheme::Unknown
                }
            }
        }
    }
}

/// A navigation target. Every variant has exactly one canonical string form (see [Display]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Route {
    Page(StaticPage),
    Recipe {
        id: String,
    },
    Person {
        id: String,
    },
    Work {
        id: String,
    },
    /// `ancient-term:`, `identification:`, `ingredient-product:` and `material-source:` routes
    Interpretation {
        kind: InterpretationKind,
        id: String,
    },
    /// `workshop-ingredient:`, `workshop-tool:` and `workshop-process:` routes
    WorkshopEntity {
        kind: WorkshopKind,
        id: String,
    },
    /// A recipe item that has no master record: `workshop-unlinked:<kind>:<recipeId>:<itemId>`
    WorkshopUnlinked {
        kind: WorkshopKind,
        recipe_id: String,
        item_id: String,
    },
    Docs {
        slug: String,
    },
}

/// Anything that can answer "does `collection` hold a record with this id".
pub trait EntityIndex {
    fn contains(&self, collection: &str, id: &str) -> bool;
}

impl EntityIndex for Dataset {
    fn contains(&self, collection: &str, id: &str) -> bool {
        Dataset::contains(self, collection, id)
    }
}

impl Route {
    pub fn home() -> Route {
        Route::Page(StaticPage::Home)
    }

    /// Parse a canonical route string. Purely syntactic: unrecognized shapes, wrong arity and
    /// empty segments are all "no match".
    pub fn parse(s: &str) -> Option<Route> {
        let segments: Vec<&str> = s.split(':').collect();
        if segments.iter().any(|seg| seg.is_empty()) {
            return None;
        }
        if let [single] = segments.as_slice() {
            return StaticPage::parse(single).map(Route::Page);
        }
        let (head, rest) = segments.split_first()?;
        let id = |rest: &[&str]| match rest {
            [id] => Some(id.to_string()),
            _ => None,
        };
        match RouteScheme::from(*head) {
            RouteScheme::Recipe => id(rest).map(|id| Route::Recipe { id }),
            RouteScheme::Person => id(rest).map(|id| Route::Person { id }),
            RouteScheme::Work => id(rest).map(|id| Route::Work { id }),
            RouteScheme::Docs => id(rest).map(|slug| Route::Docs { slug }),
            RouteScheme::Interpretation(kind) => {
                id(rest).map(|id| Route::Interpretation { kind, id })
            }
            RouteScheme::Workshop(kind) => id(rest).map(|id| Route::WorkshopEntity { kind, id }),
            RouteScheme::WorkshopUnlinked => match rest {
                [kind, recipe_id, item_id] => {
                    WorkshopKind::parse(kind).map(|kind| Route::WorkshopUnlinked {
                        kind,
                        recipe_id: recipe_id.to_string(),
                        item_id: item_id.to_string(),
                    })
                }
                _ => None,
            },
            RouteScheme::InterpretationAlias
            | RouteScheme::WorkshopEntityAlias
            | RouteScheme::Unknown => None,
        }
    }

    /// Parse a route as written in an annotation link.
    ///
    /// On top of the canonical entity routes this accepts the long forms
    /// `interpretation:<kind>:<id>` and `workshop-entity:<kind>:<id>`. Static pages parse as
    /// [Route::Page]. `docs:` and `workshop-unlinked:` routes are not link targets.
    pub fn parse_link(s: &str) -> Option<Route> {
        let segments: Vec<&str> = s.split(':').collect();
        if segments.iter().any(|seg| seg.is_empty()) {
            return None;
        }
        match segments.as_slice() {
            [head, kind, id] if RouteScheme::from(*head) == RouteScheme::InterpretationAlias => {
                InterpretationKind::parse(kind).map(|kind| Route::Interpretation {
                    kind,
                    id: id.to_string(),
                })
            }
            [head, kind, id] if RouteScheme::from(*head) == RouteScheme::WorkshopEntityAlias => {
                WorkshopKind::parse(kind).map(|kind| Route::WorkshopEntity {
                    kind,
                    id: id.to_string(),
                })
            }
            _ => match Route::parse(s)? {
                Route::Docs { .. } | Route::WorkshopUnlinked { .. } => None,
                route => Some(route),
            },
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Route::Page(StaticPage::Search))
    }

    /// The `(collection, id)` this route points at, if it points at a dataset record.
    ///
    /// Unlinked workshop routes point at their recipe.
    pub fn target(&self) -> Option<(&'static str, &str)> {
        match self {
            Route::Recipe { id } => Some((RECIPES, id)),
            Route::Person { id } => Some((MASTER_PEOPLE, id)),
            Route::Work { id } => Some((MASTER_WORKS, id)),
            Route::Interpretation { kind, id } => Some((kind.collection(), id)),
            Route::WorkshopEntity { kind, id } => Some((kind.collection(), id)),
            Route::WorkshopUnlinked { recipe_id, .. } => Some((RECIPES, recipe_id)),
            Route::Page(_) | Route::Docs { .. } => None,
        }
    }

    /// Whether the record this route points at exists. Routes without a record target always
    /// resolve.
    pub fn resolves<I: EntityIndex + ?Sized>(&self, index: &I) -> bool {
        match self.target() {
            Some((collection, id)) => index.contains(collection, id),
            None => true,
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Page(page) => write!(f, "{page}"),
            Route::Recipe { id } => write!(f, "recipe:{id}"),
            Route::Person { id } => write!(f, "person:{id}"),
            Route::Work { id } => write!(f, "work:{id}"),
            Route::Interpretation { kind, id } => write!(f, "{kind}:{id}"),
            Route::WorkshopEntity { kind, id } => write!(f, "workshop-{kind}:{id}"),
            Route::WorkshopUnlinked {
                kind,
                recipe_id,
                item_id,
            } => write!(f, "workshop-unlinked:{kind}:{recipe_id}:{item_id}"),
            Route::Docs { slug } => write!(f, "docs:{slug}"),
        }
    }
}

impl FromStr for Route {
    type Err = AosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s).ok_or_else(|| AosError::InvalidRoute(format!("'{s}'")))
    }
}
