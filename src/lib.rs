//! # aos-core
//!
//! Routing and referential-integrity core for the Alchemies of Scent site: annotated ancient
//! perfume recipes, the workshop's ingredient identifications, and the people and works they
//! come from.
//!
//! ## Overview
//!
//! All content lives in one JSON document, the dataset. Records point at each other through
//! typed route strings such as `recipe:r-rose-perfume` or `workshop-tool:tool-mortar-pestle`.
//! This crate owns those strings end to end:
//!
//! - **Navigation**: parse route strings into [`route::Route`], carry them in the address bar
//!   ([`url_codec`]), migrate routes from the old hardcoded-id site ([`legacy`]) and derive
//!   breadcrumb trails ([`breadcrumb`]). None of these fail: malformed input falls back to the
//!   home page and dangling ids fall back to generic labels.
//! - **Integrity**: [`validate::validate`] checks a dataset document for duplicate ids and URNs,
//!   dangling references and un-migrated link routes, and reports every violation in one pass.
//!
//! Around those sit the typed [`dataset`] model with load/save, slug and URN derivation
//! ([`ident`]), metadata inheritance from source works ([`inherit`]), reducer-style editing
//! ([`store`]) and the TOML [`config`] read by the `aos` binary.
//!
//! ## Quick Start
//!
//! ### Resolving an address
//!
//! ```rust
//! use aos_core::{breadcrumb::build_breadcrumbs, dataset::Dataset, url_codec};
//!
//! let dataset = Dataset::from_json_str(r#"{"masterPeople": [
//!     {"id": "p-dioscorides", "slug": "dioscorides", "urn": "urn:aos:person:dioscorides",
//!      "displayName": "Pedanius Dioscorides"}
//! ]}"#).unwrap();
//!
//! let state = url_codec::resolve_location("?r=person%3Ap-dioscorides", &dataset);
//! assert_eq!(state.route, "person:p-dioscorides");
//!
//! let trail = build_breadcrumbs(&state.typed_route(), &dataset);
//! let labels: Vec<&str> = trail.iter().map(|c| c.label.as_str()).collect();
//! assert_eq!(labels, ["Home", "People", "Pedanius Dioscorides"]);
//! assert_eq!(url_codec::encode(&state), "?r=person:p-dioscorides");
//! ```
//!
//! ### Checking a dataset
//!
//! ```rust,no_run
//! use aos_core::validate::validate_files;
//!
//! let errors = validate_files("public/data/dataset.json", "src/content/curated.ts");
//! for error in &errors {
//!     eprintln!("{error}");
//! }
//! std::process::exit(if errors.is_empty() { 0 } else { 1 });
//! ```
//!
//! ## Features
//!
//! - **default**: the library
//! - **bin**: the `aos` command line tool (`validate`, `route`, `slug`)

pub mod breadcrumb;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ident;
pub mod inherit;
pub mod legacy;
pub mod route;
pub mod store;
#[cfg(test)]
mod tests;
pub mod url_codec;
pub mod validate;

pub use error::*;
