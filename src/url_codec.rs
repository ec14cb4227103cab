//! Address-bar state.
//!
//! The whole navigation state lives in the query string: `r=` carries the route string, `q=`
//! carries the search text (meaningful only on the search route) and any other parameters ride
//! along untouched. Colons stay literal when encoding so typed routes remain readable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::form_urlencoded;

use crate::{
    dataset::Dataset,
    legacy::{resolve_legacy, LegacyResolution},
    route::{Route, StaticPage},
};

pub const ROUTE_PARAM: &str = "r";
pub const SEARCH_PARAM: &str = "q";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    pub route: String,
    pub query: String,
    pub params: BTreeMap<String, String>,
}

impl Default for NavState {
    fn default() -> Self {
        NavState {
            route: StaticPage::Home.to_string(),
            query: String::new(),
            params: BTreeMap::new(),
        }
    }
}

impl NavState {
    pub fn for_route(route: &Route) -> Self {
        NavState {
            route: route.to_string(),
            ..Default::default()
        }
    }

    pub fn search(query: &str) -> Self {
        NavState {
            route: StaticPage::Search.to_string(),
            query: query.to_string(),
            params: BTreeMap::new(),
        }
    }

    /// The typed route; anything unparsable is home.
    pub fn typed_route(&self) -> Route {
        Route::parse(&self.route).unwrap_or_else(Route::home)
    }

    pub fn is_search(&self) -> bool {
        self.route == StaticPage::Search.as_str()
    }
}

/// Keep `candidate` if it is an allow-listed page or a well-formed typed route, else home.
pub fn normalize_route(candidate: &str) -> String {
    let candidate = candidate.trim();
    if Route::parse(candidate).is_some() {
        candidate.to_string()
    } else {
        tracing::debug!("[normalize_route] {candidate:?} is not a known route; using home");
        StaticPage::Home.to_string()
    }
}

fn decode_raw(query_string: &str) -> NavState {
    let query_string = query_string.strip_prefix('?').unwrap_or(query_string);
    let mut route: Option<String> = None;
    let mut query: Option<String> = None;
    let mut params = BTreeMap::new();
    for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
        match key.as_ref() {
            ROUTE_PARAM => {
                route.get_or_insert_with(|| value.into_owned());
            }
            SEARCH_PARAM => {
                query.get_or_insert_with(|| value.into_owned());
            }
            _ => {
                params.insert(key.into_owned(), value.into_owned());
            }
        }
    }
    let route = route
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| StaticPage::Home.to_string());
    let query = if route == StaticPage::Search.as_str() {
        query.unwrap_or_default()
    } else {
        String::new()
    };
    NavState {
        route,
        query,
        params,
    }
}

/// Decode a query string (with or without the leading `?`) into a [NavState] whose route is
/// always valid.
pub fn decode(query_string: &str) -> NavState {
    let mut state = decode_raw(query_string);
    state.route = normalize_route(&state.route);
    state
}

/// Decode and also migrate legacy routes against the current dataset.
pub fn resolve_location(query_string: &str, dataset: &Dataset) -> NavState {
    let mut state = decode_raw(query_string);
    state.route = match resolve_legacy(&state.route, dataset) {
        LegacyResolution::Resolved(route) | LegacyResolution::Degraded(route) => route.to_string(),
        LegacyResolution::Unresolved => StaticPage::Home.to_string(),
        LegacyResolution::NotLegacy => normalize_route(&state.route),
    };
    state
}

fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace("%3A", ":")
}

/// Encode `state` as a query string starting with `?`.
pub fn encode(state: &NavState) -> String {
    let mut out = format!("?{ROUTE_PARAM}={}", encode_component(&state.route));
    if state.is_search() {
        if !state.query.is_empty() {
            out.push_str(&format!("&{SEARCH_PARAM}={}", encode_component(&state.query)));
        }
        for (key, value) in &state.params {
            out.push_str(&format!(
                "&{}={}",
                encode_component(key),
                encode_component(value)
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::sample_dataset;
    use test_log::test;

    #[test]
    fn decodes_percent_encoded_route() {
        let state = decode("?r=person%3Ap-dioscorides");
        assert_eq!(state.route, "person:p-dioscorides");
        assert_eq!(state.query, "");
        assert!(state.params.is_empty());
    }

    #[test]
    fn missing_blank_or_malformed_route_is_home() {
        assert_eq!(decode("").route, "home");
        assert_eq!(decode("?r=").route, "home");
        assert_eq!(decode("?r=%20%20").route, "home");
        assert_eq!(decode("?r=recipe:").route, "home");
        assert_eq!(decode("?r=%3Cscript%3E").route, "home");
        assert_eq!(decode("r=archive").route, "archive");
    }

    #[test]
    fn search_state_carries_query_and_extras() {
        let state = decode("?r=search&q=rose+oil&lang=grc&page=2");
        assert_eq!(state.route, "search");
        assert_eq!(state.query, "rose oil");
        assert_eq!(state.params.get("lang").map(String::as_str), Some("grc"));
        assert_eq!(state.params.len(), 2);
        assert_eq!(encode(&state), "?r=search&q=rose+oil&lang=grc&page=2");

        // q is only meaningful on the search route; extras are still collected.
        let state = decode("?r=archive&q=rose&lang=grc");
        assert_eq!(state.query, "");
        assert_eq!(state.params.len(), 1);
        assert_eq!(encode(&state), "?r=archive");
    }

    #[test]
    fn encode_keeps_colons_literal() {
        let route = Route::parse("workshop-unlinked:ingredient:r-rose-perfume:i2").unwrap();
        let encoded = encode(&NavState::for_route(&route));
        assert_eq!(encoded, "?r=workshop-unlinked:ingredient:r-rose-perfume:i2");
        assert_eq!(decode(&encoded).typed_route(), route);
        assert_eq!(encode(&NavState::search("")), "?r=search");
    }

    #[test]
    fn resolve_location_migrates_legacy_routes() {
        let mut ds = sample_dataset();
        assert_eq!(
            resolve_location("?r=recipe_rose", &ds).route,
            "recipe:r-rose-perfume"
        );
        ds.recipes.clear();
        assert_eq!(resolve_location("?r=recipe_rose", &ds).route, "archive");
        assert_eq!(resolve_location("?r=recipe_megaleion", &ds).route, "home");
        assert_eq!(resolve_location("?r=people", &ds).route, "people");
        assert_eq!(resolve_location("?r=bogus_thing", &ds).route, "home");
    }
}
