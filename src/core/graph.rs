use log::debug;
use petgraph::{graph::NodeIndex, Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::fileset::{FileMap, RepositoryFileSet};
use crate::parsers::file_extension;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileNode {
    pub path: String,
    pub extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportEdge {
    /// Raw import string that first produced this edge.
    pub import: String,
}

impl FileNode {
    pub fn new(path: String) -> Self {
        let extension = file_extension(&path);
        Self { path, extension }
    }
}

impl ImportEdge {
    pub fn new(import: String) -> Self {
        Self { import }
    }
}

/// File-level "imports" graph. Node weights are repository paths.
pub type DependencyGraph = Graph<FileNode, ImportEdge, Directed>;

pub struct GraphBuilder {
    graph: DependencyGraph,
    node_map: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Build the graph for a whole file set: every file is a node, and
    /// `A -> B` exists when some raw import of `A` is a substring of `B`'s path.
    ///
    /// This heuristic is language-agnostic and deliberately independent of
    /// [`ImportResolver`](super::ImportResolver), so edges and `imported_by`
    /// can disagree.
    pub fn from_imports(
        files: &RepositoryFileSet,
        imports: &FileMap<Vec<String>>,
    ) -> DependencyGraph {
        let mut builder = Self::new();
        for path in files.keys() {
            builder.add_node(FileNode::new(path.to_string()));
        }

        for importer in files.keys() {
            let Some(raw) = imports.get(importer) else {
                continue;
            };
            for import in raw {
                for target in files.keys() {
                    if target.contains(import.as_str()) {
                        builder.add_edge(importer, target, import);
                    }
                }
            }
        }

        let graph = builder.build();
        debug!(
            "dependency graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    /// Adds a node, or returns the existing index for an already known path.
    pub fn add_node(&mut self, node: FileNode) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&node.path) {
            return index;
        }
        let path = node.path.clone();
        let index = self.graph.add_node(node);
        self.node_map.insert(path, index);
        index
    }

    /// Idempotent: an existing `source -> target` edge is left untouched.
    /// Returns `None` when either endpoint is unknown. Self-loops are allowed.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        import: &str,
    ) -> Option<petgraph::graph::EdgeIndex> {
        let source_idx = *self.node_map.get(source)?;
        let target_idx = *self.node_map.get(target)?;
        if let Some(existing) = self.graph.find_edge(source_idx, target_idx) {
            return Some(existing);
        }
        Some(
            self.graph
                .add_edge(source_idx, target_idx, ImportEdge::new(import.to_string())),
        )
    }

    pub fn build(self) -> DependencyGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
