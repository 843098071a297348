//! Documentation nodes and the resolver seam.
//!
//! The annotator never walks the host's documentation tree itself. It asks a
//! [`Resolver`] for the node at a symbol path and appends to the node it gets
//! back. [`DocRegistry`] is the serializable implementation used by the CLI
//! and the tests; an embedding host implements [`Resolver`] over its own
//! registry.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::annotator::DisplayRecord;
use crate::error::RoutedocError;
use crate::Result;

/// Resolve a symbol path to a documentation node.
pub trait Resolver {
    /// The node documenting `path` (e.g. `Admin::UsersController#index`), or
    /// `None` when nothing is documented under that path.
    fn lookup(&mut self, path: &str) -> Option<&mut DocNode>;
}

/// A documentation node of the host registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocNode {
    /// Symbol path of the documented object
    pub path: String,
    /// Routes attached by the annotator, in attachment order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<DisplayRecord>,
    /// Host fields this crate does not interpret, kept as-is
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DocNode {
    /// Create a node with no routes.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Append a route; existing entries are never touched.
    pub fn attach(&mut self, record: DisplayRecord) {
        self.routes.push(record);
    }
}

/// An in-memory documentation registry indexed by symbol path.
///
/// Serializes as a JSON array of nodes in load order. When two nodes share a
/// path, lookups resolve to the first one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<DocNode>", into = "Vec<DocNode>")]
pub struct DocRegistry {
    nodes: Vec<DocNode>,
    index: HashMap<String, usize>,
}

impl From<Vec<DocNode>> for DocRegistry {
    fn from(nodes: Vec<DocNode>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            index.entry(node.path.clone()).or_insert(i);
        }
        Self { nodes, index }
    }
}

impl From<DocRegistry> for Vec<DocNode> {
    fn from(registry: DocRegistry) -> Self {
        registry.nodes
    }
}

impl FromIterator<DocNode> for DocRegistry {
    fn from_iter<I: IntoIterator<Item = DocNode>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl DocRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with one bare node per symbol path.
    pub fn with_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths.into_iter().map(DocNode::new).collect()
    }

    /// Add a node at the end.
    pub fn insert(&mut self, node: DocNode) {
        self.index
            .entry(node.path.clone())
            .or_insert(self.nodes.len());
        self.nodes.push(node);
    }

    /// The node at `path`, if any.
    pub fn get(&self, path: &str) -> Option<&DocNode> {
        self.index.get(path).map(|&i| &self.nodes[i])
    }

    /// All nodes in load order.
    pub fn nodes(&self) -> &[DocNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parse a registry from a JSON array of nodes.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load a registry from a JSON file.
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

    /// Pretty-printed JSON array of nodes.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.nodes)
    }
}

impl Resolver for DocRegistry {
    fn lookup(&mut self, path: &str) -> Option<&mut DocNode> {
        let i = *self.index.get(path)?;
        self.nodes.get_mut(i)
    }
}
