//! graph
//!
//! The lexicon graph: lemma -> root -> binary-root, plus optional
//! similarity edges between lemmas.
//!
//! # Model
//!
//! - Node ids are stable strings: `lemma:<text>`, `root:<text>`,
//!   `bin:<text>`
//! - `HasRoot` edges connect a lemma to its normalized root
//! - `Nucleus` edges connect a root to its two-letter nucleus
//! - `SimilarForm` edges connect lemma pairs whose form similarity cleared
//!   the export cutoff, weighted by that similarity
//!
//! The graph serializes as a single pretty-printed JSON artifact meant for
//! downstream visualization and cross-language comparison stages.

pub mod export;

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for graph nodes.
pub type NodeId = String;

/// Errors from graph construction and export.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("missing input: {0}")]
    MissingInput(PathBuf),

    #[error(transparent)]
    Jsonl(#[from] crate::lexicon::jsonl::JsonlError),

    #[error("failed to read edges csv '{path}': {message}")]
    EdgesCsv { path: PathBuf, message: String },

    #[error("failed to write graph '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize graph: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Lemma,
    Root,
    BinaryRoot,
}

/// Edge kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Lemma -> root.
    HasRoot,
    /// Root -> binary root.
    Nucleus,
    /// Lemma <-> lemma, weighted by form similarity.
    SimilarForm,
}

/// A node in the lexicon graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Display text (the bare lemma/root/nucleus).
    pub label: String,
}

/// A directed edge in the lexicon graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
    /// Similarity weight for `SimilarForm` edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Metadata about the exported graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMetadata {
    /// Lexicon file the graph was built from.
    pub source: String,
    /// RFC3339 UTC creation timestamp.
    pub created_at: String,
    pub total_nodes: usize,
    pub total_edges: usize,
}

/// Counts per node and edge kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub lemmas: usize,
    pub roots: usize,
    pub binary_roots: usize,
    pub has_root_edges: usize,
    pub nucleus_edges: usize,
    pub similar_form_edges: usize,
}

/// The lexicon graph.
///
/// Nodes live in a BTreeMap so serialization order is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconGraph {
    pub nodes: BTreeMap<NodeId, Node>,
    pub edges: Vec<Edge>,
    pub metadata: GraphMetadata,

    /// Dedup index for structural edges. Not serialized.
    #[serde(skip)]
    edge_index: HashSet<(NodeId, NodeId, EdgeKind)>,
}

impl LexiconGraph {
    /// Create an empty graph for a lexicon source.
    pub fn new(source: &Path) -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            metadata: GraphMetadata {
                source: source.display().to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
                total_nodes: 0,
                total_edges: 0,
            },
            edge_index: HashSet::new(),
        }
    }

    /// Stable node id for a kind and label.
    pub fn node_id(kind: NodeKind, label: &str) -> NodeId {
        let prefix = match kind {
            NodeKind::Lemma => "lemma",
            NodeKind::Root => "root",
            NodeKind::BinaryRoot => "bin",
        };
        format!("{}:{}", prefix, label)
    }

    /// Insert a node if absent, returning its id.
    pub fn ensure_node(&mut self, kind: NodeKind, label: &str) -> NodeId {
        let id = Self::node_id(kind, label);
        self.nodes.entry(id.clone()).or_insert_with(|| Node {
            id: id.clone(),
            kind,
            label: label.to_string(),
        });
        id
    }

    /// Add an edge unless an identical (source, target, kind) one exists.
    ///
    /// Returns true when the edge was added.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        kind: EdgeKind,
        weight: Option<f64>,
    ) -> bool {
        if !self
            .edge_index
            .insert((source.clone(), target.clone(), kind))
        {
            return false;
        }
        self.edges.push(Edge {
            source,
            target,
            kind,
            weight,
        });
        true
    }

    /// Compute per-kind counts.
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats::default();
        for node in self.nodes.values() {
            match node.kind {
                NodeKind::Lemma => stats.lemmas += 1,
                NodeKind::Root => stats.roots += 1,
                NodeKind::BinaryRoot => stats.binary_roots += 1,
            }
        }
        for edge in &self.edges {
            match edge.kind {
                EdgeKind::HasRoot => stats.has_root_edges += 1,
                EdgeKind::Nucleus => stats.nucleus_edges += 1,
                EdgeKind::SimilarForm => stats.similar_form_edges += 1,
            }
        }
        stats
    }

    /// Serialize the graph to pretty JSON at `path`.
    ///
    /// Totals in the metadata are refreshed before writing.
    pub fn save_to_file(&mut self, path: &Path) -> Result<(), GraphError> {
        self.metadata.total_nodes = self.nodes.len();
        self.metadata.total_edges = self.edges.len();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GraphError::WriteFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body).map_err(|source| GraphError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn ensure_node_deduplicates() {
        let mut graph = LexiconGraph::new(&PathBuf::from("lex.jsonl"));
        let a = graph.ensure_node(NodeKind::Lemma, "كتاب");
        let b = graph.ensure_node(NodeKind::Lemma, "كتاب");
        assert_eq!(a, b);
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(a, "lemma:كتاب");
    }

    #[test]
    fn same_label_different_kind_is_distinct() {
        let mut graph = LexiconGraph::new(&PathBuf::from("lex.jsonl"));
        graph.ensure_node(NodeKind::Root, "قلم");
        graph.ensure_node(NodeKind::Lemma, "قلم");
        assert_eq!(graph.nodes.len(), 2);
    }

    #[test]
    fn add_edge_deduplicates_by_kind() {
        let mut graph = LexiconGraph::new(&PathBuf::from("lex.jsonl"));
        let lemma = graph.ensure_node(NodeKind::Lemma, "كتاب");
        let root = graph.ensure_node(NodeKind::Root, "كتب");
        assert!(graph.add_edge(lemma.clone(), root.clone(), EdgeKind::HasRoot, None));
        assert!(!graph.add_edge(lemma.clone(), root.clone(), EdgeKind::HasRoot, None));
        assert!(graph.add_edge(lemma, root, EdgeKind::SimilarForm, Some(0.8)));
        assert_eq!(graph.edges.len(), 2);
    }

    #[test]
    fn stats_count_kinds() {
        let mut graph = LexiconGraph::new(&PathBuf::from("lex.jsonl"));
        let lemma = graph.ensure_node(NodeKind::Lemma, "كتاب");
        let root = graph.ensure_node(NodeKind::Root, "كتب");
        let nucleus = graph.ensure_node(NodeKind::BinaryRoot, "كت");
        graph.add_edge(lemma, root.clone(), EdgeKind::HasRoot, None);
        graph.add_edge(root, nucleus, EdgeKind::Nucleus, None);

        let stats = graph.stats();
        assert_eq!(stats.lemmas, 1);
        assert_eq!(stats.roots, 1);
        assert_eq!(stats.binary_roots, 1);
        assert_eq!(stats.has_root_edges, 1);
        assert_eq!(stats.nucleus_edges, 1);
        assert_eq!(stats.similar_form_edges, 0);
    }

    #[test]
    fn save_refreshes_totals() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("graph").join("out.json");

        let mut graph = LexiconGraph::new(&PathBuf::from("lex.jsonl"));
        let lemma = graph.ensure_node(NodeKind::Lemma, "كتاب");
        let root = graph.ensure_node(NodeKind::Root, "كتب");
        graph.add_edge(lemma, root, EdgeKind::HasRoot, None);
        graph.save_to_file(&path).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        let parsed: LexiconGraph = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.metadata.total_nodes, 2);
        assert_eq!(parsed.metadata.total_edges, 1);
    }
}
