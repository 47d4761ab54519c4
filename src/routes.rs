//! Named route resolution
//!
//! Views and requests refer to backend endpoints by symbolic name only.
//! The table is built once at startup from the defaults plus any overrides
//! in the user config.

use std::collections::HashMap;
use thiserror::Error;

pub const DASHBOARD: &str = "dashboard";
pub const PROVINCES_INDEX: &str = "provinces.index";
pub const PROVINCES_CREATE: &str = "provinces.create";
pub const PROVINCES_STORE: &str = "provinces.store";

/// Default route paths, relative to the backend base URL
const DEFAULT_ROUTES: &[(&str, &str)] = &[
    (DASHBOARD, "/dashboard"),
    (PROVINCES_INDEX, "/provinces"),
    (PROVINCES_CREATE, "/provinces/create"),
    (PROVINCES_STORE, "/provinces"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route [{0}] not defined")]
    NotDefined(String),
}

/// Lookup table from symbolic route name to concrete path
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, String>,
}

impl RouteTable {
    /// Build the table from defaults, applying overrides on top
    pub fn new(overrides: &HashMap<String, String>) -> Self {
        let mut routes: HashMap<String, String> = DEFAULT_ROUTES
            .iter()
            .map(|(name, path)| (name.to_string(), path.to_string()))
            .collect();

        for (name, path) in overrides {
            tracing::debug!("Route override: {name} -> {path}");
            routes.insert(name.clone(), normalize_path(path));
        }

        Self { routes }
    }

    /// Resolve a route name to its path
    pub fn resolve(&self, name: &str) -> Result<&str, RouteError> {
        self.routes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| RouteError::NotDefined(name.to_string()))
    }

    /// Find the route name for a path, ignoring any scheme/host prefix.
    ///
    /// Only "view" routes are matched: `provinces.store` shares its path with
    /// `provinces.index`, and a redirect always targets the latter.
    pub fn name_for_location(&self, location: &str) -> Option<&'static str> {
        let path = strip_origin(location);
        let path = path.trim_end_matches('/');
        [DASHBOARD, PROVINCES_INDEX, PROVINCES_CREATE]
            .into_iter()
            .find(|name| {
                self.routes
                    .get(*name)
                    .is_some_and(|p| p.trim_end_matches('/') == path)
            })
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(&HashMap::new())
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn strip_origin(location: &str) -> &str {
    match location.find("://") {
        Some(scheme_end) => {
            let rest = &location[scheme_end + 3..];
            rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
        }
        None => location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_routes_resolve() {
        let routes = RouteTable::default();
        assert_eq!(routes.resolve(DASHBOARD), Ok("/dashboard"));
        assert_eq!(routes.resolve(PROVINCES_INDEX), Ok("/provinces"));
        assert_eq!(routes.resolve(PROVINCES_CREATE), Ok("/provinces/create"));
        assert_eq!(routes.resolve(PROVINCES_STORE), Ok("/provinces"));
    }

    #[test]
    fn test_unknown_route_is_error() {
        let routes = RouteTable::default();
        assert_eq!(
            routes.resolve("regencies.index"),
            Err(RouteError::NotDefined("regencies.index".to_string()))
        );
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let mut overrides = HashMap::new();
        overrides.insert(PROVINCES_STORE.to_string(), "admin/provinces".to_string());
        let routes = RouteTable::new(&overrides);
        assert_eq!(routes.resolve(PROVINCES_STORE), Ok("/admin/provinces"));
        assert_eq!(routes.resolve(PROVINCES_INDEX), Ok("/provinces"));
    }

    #[test]
    fn test_name_for_location_relative() {
        let routes = RouteTable::default();
        assert_eq!(routes.name_for_location("/provinces"), Some(PROVINCES_INDEX));
        assert_eq!(routes.name_for_location("/provinces/"), Some(PROVINCES_INDEX));
        assert_eq!(routes.name_for_location("/dashboard"), Some(DASHBOARD));
    }

    #[test]
    fn test_name_for_location_absolute() {
        let routes = RouteTable::default();
        assert_eq!(
            routes.name_for_location("http://admin.test/provinces"),
            Some(PROVINCES_INDEX)
        );
        assert_eq!(routes.name_for_location("https://admin.test"), None);
    }

    #[test]
    fn test_name_for_location_unknown() {
        let routes = RouteTable::default();
        assert_eq!(routes.name_for_location("/countries"), None);
    }
}
