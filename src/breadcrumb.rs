//! Breadcrumb trails.
//!
//! A trail runs from Home to the current page. Entity labels are looked up in the dataset; a
//! dangling id never fails, it just yields the generic label for its kind. The last crumb is never
//! a link.

use serde::Serialize;

use crate::{
    dataset::{non_empty, Dataset, InterpretationKind, WorkshopKind},
    route::{Route, StaticPage},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

impl Crumb {
    pub fn link(label: &str, route: &Route) -> Crumb {
        Crumb {
            label: label.to_string(),
            route: Some(route.to_string()),
        }
    }

    pub fn text(label: &str) -> Crumb {
        Crumb {
            label: label.to_string(),
            route: None,
        }
    }
}

fn page(p: StaticPage) -> Route {
    Route::Page(p)
}

fn page_label(p: StaticPage) -> &'static str {
    match p {
        StaticPage::Home => "Home",
        StaticPage::About => "About",
        StaticPage::Project => "Project",
        StaticPage::Team => "Team",
        StaticPage::News => "News",
        StaticPage::Search => "Search",
        StaticPage::Archive => "Recipes",
        StaticPage::Workshop => "Workshop",
        StaticPage::Materials => "Materials",
        StaticPage::Ingredients => "Ingredients",
        StaticPage::Tools => "Tools",
        StaticPage::Processes => "Processes",
        StaticPage::Works => "Works",
        StaticPage::People => "People",
        StaticPage::AncientTerms => "Ancient terms",
        StaticPage::Identifications => "Identifications",
        StaticPage::IngredientProducts => "Ingredient products",
        StaticPage::MaterialSources => "Material sources",
        StaticPage::Docs => "Docs",
        StaticPage::Admin => "Admin",
    }
}

const LIBRARY: &str = "Library";

fn workshop_generic(kind: WorkshopKind) -> &'static str {
    match kind {
        WorkshopKind::Ingredient => "Ingredient",
        WorkshopKind::Tool => "Tool",
        WorkshopKind::Process => "Process",
    }
}

fn interpretation_generic(kind: InterpretationKind) -> &'static str {
    match kind {
        InterpretationKind::AncientTerm => "Ancient term",
        InterpretationKind::Identification => "Identification",
        InterpretationKind::IngredientProduct => "Ingredient product",
        InterpretationKind::MaterialSource => "Material source",
    }
}

/// Accumulates crumbs; [Trail::finish] strips the link from the last one.
struct Trail(Vec<Crumb>);

impl Trail {
    fn home() -> Self {
        Trail(vec![Crumb::link(
            page_label(StaticPage::Home),
            &Route::home(),
        )])
    }

    fn page(mut self, p: StaticPage) -> Self {
        self.0.push(Crumb::link(page_label(p), &page(p)));
        self
    }

    fn group(mut self, label: &str) -> Self {
        self.0.push(Crumb::text(label));
        self
    }

    fn link(mut self, label: &str, route: &Route) -> Self {
        self.0.push(Crumb::link(label, route));
        self
    }

    fn leaf(mut self, label: &str) -> Vec<Crumb> {
        self.0.push(Crumb::text(label));
        self.0
    }

    fn finish(mut self) -> Vec<Crumb> {
        if let Some(last) = self.0.last_mut() {
            last.route = None;
        }
        self.0
    }

    /// Home > Workshop > [Materials >] <listing>
    fn workshop(self, listing: StaticPage) -> Self {
        let trail = self.page(StaticPage::Workshop);
        match listing {
            StaticPage::Tools | StaticPage::Processes => trail.page(listing),
            _ => trail.page(StaticPage::Materials).page(listing),
        }
    }
}

/// The breadcrumb trail for `route`.
pub fn build_breadcrumbs(route: &Route, dataset: &Dataset) -> Vec<Crumb> {
    match route {
        Route::WorkshopEntity { kind, id } => {
            let label = dataset
                .master(*kind, id)
                .and_then(|m| m.label())
                .unwrap_or_else(|| fallback(route, workshop_generic(*kind)));
            Trail::home()
                .workshop(StaticPage::for_workshop(*kind))
                .leaf(label)
        }
        Route::WorkshopUnlinked {
            kind,
            recipe_id,
            item_id,
        } => {
            let label = dataset
                .recipe(recipe_id)
                .and_then(|r| r.item(item_id))
                .and_then(|item| {
                    non_empty(item.display_term.as_deref())
                        .or_else(|| non_empty(item.original_term.as_deref()))
                        .or_else(|| non_empty(item.name.as_deref()))
                })
                .unwrap_or_else(|| fallback(route, workshop_generic(*kind)));
            Trail::home()
                .workshop(StaticPage::for_workshop(*kind))
                .leaf(label)
        }
        Route::Interpretation { kind, id } => {
            let label = interpretation_label(*kind, id, dataset)
                .unwrap_or_else(|| fallback(route, interpretation_generic(*kind)).to_string());
            Trail::home()
                .workshop(StaticPage::for_interpretation(*kind))
                .leaf(&label)
        }
        Route::Recipe { id } => {
            let label = dataset
                .recipe(id)
                .and_then(|r| non_empty(Some(r.metadata.title.as_str())))
                .unwrap_or_else(|| fallback(route, "Recipe"));
            Trail::home()
                .group(LIBRARY)
                .page(StaticPage::Archive)
                .leaf(label)
        }
        Route::Person { id } => {
            let label = dataset
                .person(id)
                .and_then(|p| p.label())
                .unwrap_or_else(|| fallback(route, "Person"));
            Trail::home().page(StaticPage::People).leaf(label)
        }
        Route::Work { id } => {
            let work = dataset.work(id);
            let label = work
                .and_then(|w| w.label())
                .unwrap_or_else(|| fallback(route, "Work"));
            let mut trail = Trail::home().group(LIBRARY).page(StaticPage::Works);
            if let Some(parent) = work
                .and_then(|w| w.parent_id.as_deref())
                .and_then(|pid| dataset.work(pid))
            {
                trail = trail.link(
                    parent.label().unwrap_or("Work"),
                    &Route::Work {
                        id: parent.id.clone(),
                    },
                );
            }
            trail.leaf(label)
        }
        Route::Docs { slug } => Trail::home()
            .page(StaticPage::Docs)
            .leaf(&title_from_slug(slug)),
        Route::Page(p) => static_trail(*p),
    }
}

fn fallback<'a>(route: &Route, generic: &'a str) -> &'a str {
    tracing::debug!("[build_breadcrumbs] no label for {route}; using {generic:?}");
    generic
}

fn interpretation_label(kind: InterpretationKind, id: &str, dataset: &Dataset) -> Option<String> {
    match kind {
        InterpretationKind::AncientTerm => dataset
            .ancient_ingredient(id)
            .and_then(|a| a.label())
            .map(str::to_string),
        InterpretationKind::Identification => {
            let ident = dataset.identification(id)?;
            let term = dataset
                .ancient_ingredient(&ident.ancient_ingredient_id)
                .and_then(|a| a.label());
            let product = dataset
                .ingredient_product(&ident.ingredient_product_id)
                .and_then(|p| non_empty(Some(p.name.as_str())));
            match (term, product) {
                (Some(term), Some(product)) => Some(format!("{term} → {product}")),
                (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
                (None, None) => None,
            }
        }
        InterpretationKind::IngredientProduct => dataset
            .ingredient_product(id)
            .and_then(|p| non_empty(Some(p.name.as_str())))
            .map(str::to_string),
        InterpretationKind::MaterialSource => dataset
            .material_source(id)
            .and_then(|m| non_empty(Some(m.name.as_str())))
            .map(str::to_string),
    }
}

fn static_trail(p: StaticPage) -> Vec<Crumb> {
    let trail = Trail::home();
    match p {
        StaticPage::Home => return vec![Crumb::text(page_label(StaticPage::Home))],
        StaticPage::Archive | StaticPage::Works => trail.group(LIBRARY).page(p),
        StaticPage::Team => trail.page(StaticPage::About).page(p),
        StaticPage::Workshop => trail.page(p),
        StaticPage::Materials => trail.page(StaticPage::Workshop).page(p),
        StaticPage::Ingredients
        | StaticPage::Tools
        | StaticPage::Processes
        | StaticPage::AncientTerms
        | StaticPage::Identifications
        | StaticPage::IngredientProducts
        | StaticPage::MaterialSources => trail.workshop(p),
        StaticPage::About
        | StaticPage::Project
        | StaticPage::News
        | StaticPage::Search
        | StaticPage::People
        | StaticPage::Docs
        | StaticPage::Admin => trail.page(p),
    }
    .finish()
}

fn title_from_slug(slug: &str) -> String {
    let words = slug.replace(['-', '_'], " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Breadcrumbs for a raw route string; unparsable strings get the Home-only trail.
pub fn breadcrumbs_for(route: &str, dataset: &Dataset) -> Vec<Crumb> {
    match Route::parse(route) {
        Some(route) => build_breadcrumbs(&route, dataset),
        None => static_trail(StaticPage::Home),
    }
}
