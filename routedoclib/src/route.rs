//! Route records as handed over by the host framework.
//!
//! The host dumps its live routing table; this module only models that data.
//! Every field is optional on the wire so that a partial dump still loads:
//! absent strings become empty strings and absent flags become `false`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RoutedocError;
use crate::Result;

/// Requirement key naming the controller path (e.g. `admin/users`).
pub const CONTROLLER_KEY: &str = "controller";
/// Requirement key naming the action (e.g. `index`).
pub const ACTION_KEY: &str = "action";

/// One entry of the host framework's routing table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteRecord {
    /// Route helper name, may be empty
    pub name: String,
    /// HTTP method, empty for wildcard routes
    pub verb: String,
    /// URI pattern
    pub path: String,
    /// Dispatch requirements: `controller`, `action` and any extra constraints
    pub requirements: BTreeMap<String, String>,
    /// True when the route dispatches to something other than a controller
    pub handler_is_opaque: bool,
    /// Inspection string of the handler object, shown for opaque handlers
    pub handler: String,
    /// Framework-internal route, hidden from the rendered report
    pub internal: bool,
}

impl RouteRecord {
    /// Create a route record with no requirements.
    pub fn new(name: impl Into<String>, verb: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verb: verb.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Builder: set the controller and action requirements
    pub fn with_endpoint(self, controller: &str, action: &str) -> Self {
        self.requirement(CONTROLLER_KEY, controller)
            .requirement(ACTION_KEY, action)
    }

    /// Builder: add a requirement
    pub fn requirement(mut self, key: &str, value: &str) -> Self {
        self.requirements.insert(key.to_string(), value.to_string());
        self
    }

    /// Builder: dispatch to an opaque handler described by `inspect`
    pub fn opaque(mut self, inspect: &str) -> Self {
        self.handler_is_opaque = true;
        self.handler = inspect.to_string();
        self
    }

    /// Builder: mark as framework-internal
    pub fn internal(mut self) -> Self {
        self.internal = true;
        self
    }

    /// The raw `controller` requirement, or `""`.
    pub fn controller(&self) -> &str {
        self.requirements
            .get(CONTROLLER_KEY)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// The raw `action` requirement, or `""`.
    pub fn action(&self) -> &str {
        self.requirements
            .get(ACTION_KEY)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Requirements other than `controller` and `action`.
    pub fn constraints(&self) -> impl Iterator<Item = (&str, &str)> {
        self.requirements
            .iter()
            .filter(|(k, _)| k.as_str() != CONTROLLER_KEY && k.as_str() != ACTION_KEY)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Constraints rendered as `{key: "value", ...}`, or `""` when there are none.
    pub fn constraints_display(&self) -> String {
        let parts: Vec<String> = self
            .constraints()
            .map(|(k, v)| format!("{}: {:?}", k, v))
            .collect();

        if parts.is_empty() {
            String::new()
        } else {
            format!("{{{}}}", parts.join(", "))
        }
    }

    /// What the route dispatches to: the handler inspection string for opaque
    /// handlers, `controller#action` otherwise.
    pub fn endpoint(&self) -> String {
        if self.handler_is_opaque {
            self.handler.clone()
        } else {
            format!("{}#{}", self.controller(), self.action())
        }
    }

    /// The free-form trailing column of the report: endpoint plus constraints.
    pub fn reqs(&self) -> String {
        let endpoint = self.endpoint();
        let constraints = self.constraints_display();
        if constraints.is_empty() {
            endpoint
        } else {
            format!("{} {}", endpoint, constraints)
        }
    }
}

/// Routes contributed by a mounted engine (a sub-application with its own table).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineRoutes {
    /// Engine name as displayed in the section title
    pub name: String,
    /// The engine's routes in host order
    pub routes: Vec<RouteRecord>,
}

/// The complete route table of an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTable {
    /// The application's own routes in host order
    pub routes: Vec<RouteRecord>,
    /// Mounted engines in host order
    pub engines: Vec<EngineRoutes>,
}

/// A route dump is either a full table or a bare list of routes.
#[derive(Deserialize)]
#[serde(untagged)]
enum RouteDump {
    Table(RouteTable),
    Routes(Vec<RouteRecord>),
}

impl RouteTable {
    /// Create a table without engines.
    pub fn new(routes: Vec<RouteRecord>) -> Self {
        Self {
            routes,
            engines: Vec::new(),
        }
    }

    /// Builder: add a mounted engine
    pub fn engine(mut self, name: impl Into<String>, routes: Vec<RouteRecord>) -> Self {
        self.engines.push(EngineRoutes {
            name: name.into(),
            routes,
        });
        self
    }

    /// Parse a JSON route dump (a table object or a bare array of routes).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(match serde_json::from_str(json)? {
            RouteDump::Table(table) => table,
            RouteDump::Routes(routes) => RouteTable::new(routes),
        })
    }

    /// Load a JSON route dump from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| RoutedocError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json).map_err(|e| RoutedocError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Every route: the application's first, then each engine's, in order.
    pub fn all_routes(&self) -> impl Iterator<Item = &RouteRecord> {
        self.routes
            .iter()
            .chain(self.engines.iter().flat_map(|e| e.routes.iter()))
    }

    /// True when neither the application nor any engine has routes.
    pub fn is_empty(&self) -> bool {
        self.all_routes().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqs_controller_action() {
        let route = RouteRecord::new("users", "GET", "/users(.:format)")
            .with_endpoint("users", "index");
        assert_eq!(route.controller(), "users");
        assert_eq!(route.action(), "index");
        assert_eq!(route.reqs(), "users#index");
        assert_eq!(route.constraints_display(), "");
    }

    #[test]
    fn test_reqs_with_constraints() {
        let route = RouteRecord::new("", "GET", "/users/:id")
            .with_endpoint("users", "show")
            .requirement("id", "\\d+")
            .requirement("format", "json");
        assert_eq!(route.constraints_display(), r#"{format: "json", id: "\\d+"}"#);
        assert_eq!(route.reqs(), r#"users#show {format: "json", id: "\\d+"}"#);
    }

    #[test]
    fn test_reqs_opaque_handler() {
        let route = RouteRecord::new("", "", "/blog").opaque("Blog::Engine");
        assert_eq!(route.reqs(), "Blog::Engine");
    }

    #[test]
    fn test_reqs_without_controller() {
        let route = RouteRecord::new("", "GET", "/");
        assert_eq!(route.reqs(), "#");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let route: RouteRecord = serde_json::from_str(r#"{"path": "/ping"}"#).unwrap();
        assert_eq!(route.name, "");
        assert_eq!(route.verb, "");
        assert_eq!(route.path, "/ping");
        assert!(route.requirements.is_empty());
        assert!(!route.handler_is_opaque);
        assert!(!route.internal);
    }

    #[test]
    fn test_table_from_bare_array() {
        let table = RouteTable::from_json(
            r#"[{"name": "root", "verb": "GET", "path": "/",
                 "requirements": {"controller": "home", "action": "index"}}]"#,
        )
        .unwrap();
        assert_eq!(table.routes.len(), 1);
        assert!(table.engines.is_empty());
        assert_eq!(table.routes[0].reqs(), "home#index");
    }

    #[test]
    fn test_table_from_object_with_engines() {
        let table = RouteTable::from_json(
            r#"{"routes": [{"path": "/"}],
                "engines": [{"name": "Blog::Engine", "routes": [{"path": "/posts"}]}]}"#,
        )
        .unwrap();
        assert_eq!(table.routes.len(), 1);
        assert_eq!(table.engines[0].name, "Blog::Engine");
        let paths: Vec<&str> = table.all_routes().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/posts"]);
    }

    #[test]
    fn test_table_is_empty() {
        assert!(RouteTable::default().is_empty());
        assert!(RouteTable::default().engine("E", vec![]).is_empty());
        assert!(!RouteTable::new(vec![RouteRecord::new("", "", "/")]).is_empty());
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = RouteTable::from_path("/nonexistent/routes.json");
        assert!(matches!(result, Err(RoutedocError::FileRead { .. })));
    }

    #[test]
    fn test_from_path_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        fs::write(&path, "{ not json").unwrap();
        let result = RouteTable::from_path(&path);
        assert!(matches!(result, Err(RoutedocError::Json { .. })));
    }
}
