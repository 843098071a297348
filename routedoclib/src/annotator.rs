//! Attach routes to the documentation of the code they dispatch to.
//!
//! For each route the annotator guesses the controller class from the
//! `controller` requirement (see [`crate::naming`]) and asks the resolver for
//! two nodes: the controller class and the `Class#action` method. Every node
//! found gets the route's [`DisplayRecord`] appended. A miss is the normal
//! outcome for routes into undocumented code (inline handlers, engines,
//! mounted apps) and changes nothing.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::naming::{action_symbol_path, controller_class_name};
use crate::registry::Resolver;
use crate::route::RouteRecord;

/// Human-facing projection of a route, attached to documentation nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayRecord {
    pub name: String,
    pub verb: String,
    pub path: String,
    /// Guessed controller class name, empty when the route has no controller
    pub controller: String,
    /// Action name, empty when the route has no action
    pub action: String,
    /// Inspection string of an opaque handler
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    /// Extra constraints as `{key: "value", ...}`, or empty
    pub constraints: String,
    /// Keys written by other tools on entries already in the registry
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DisplayRecord {
    /// Project a route record.
    pub fn from_route(route: &RouteRecord) -> Self {
        let controller = match route.controller() {
            "" => String::new(),
            path => controller_class_name(path),
        };

        DisplayRecord {
            name: route.name.clone(),
            verb: route.verb.clone(),
            path: route.path.clone(),
            controller,
            action: route.action().to_string(),
            handler: route.handler_is_opaque.then(|| route.handler.clone()),
            constraints: route.constraints_display(),
            extra: serde_json::Map::new(),
        }
    }

    /// Symbol paths to look up, controller first.
    pub fn lookup_keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(2);
        if !self.controller.is_empty() {
            keys.push(self.controller.clone());
            if !self.action.is_empty() {
                keys.push(action_symbol_path(&self.controller, &self.action));
            }
        }
        keys
    }
}

/// Outcome of an annotation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationSummary {
    /// Number of routes processed
    pub routes: usize,
    /// Symbol paths that received a route, once per attachment, in order
    pub attached: Vec<String>,
    /// Symbol paths that were looked up but not found, in order
    pub missed: Vec<String>,
}

/// Attach every route to the matching controller and action nodes.
///
/// Routes are processed in input order, so each node's `routes` list ends up
/// in route table order after its pre-existing entries.
pub fn annotate<'a, R, I>(routes: I, resolver: &mut R) -> AnnotationSummary
where
    R: Resolver + ?Sized,
    I: IntoIterator<Item = &'a RouteRecord>,
{
    let mut summary = AnnotationSummary::default();

    for route in routes {
        summary.routes += 1;
        let record = DisplayRecord::from_route(route);

        for key in record.lookup_keys() {
            match resolver.lookup(&key) {
                Some(node) => {
                    trace!(symbol = %key, path = %record.path, "attached route");
                    node.attach(record.clone());
                    summary.attached.push(key);
                }
                None => {
                    debug!(symbol = %key, path = %record.path, "no documentation node");
                    summary.missed.push(key);
                }
            }
        }
    }

    summary
}
