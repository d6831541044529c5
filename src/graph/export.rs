//! graph::export
//!
//! Build the lexicon graph from a processed lexicon file and optionally
//! attach similarity edges from a cluster run.

use std::path::Path;

use serde::Deserialize;

use super::{EdgeKind, GraphError, LexiconGraph, NodeKind};
use crate::core::types::BinaryRoot;
use crate::lexicon::jsonl::JsonlReader;
use crate::lexicon::record::LexiconRecord;

/// Export options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// Minimum form similarity for a `SimilarForm` edge.
    pub similarity_cutoff: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            similarity_cutoff: 0.5,
        }
    }
}

/// Summary of a graph build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Lexicon records read.
    pub records_read: usize,
    /// Records contributing no root (lemma node only).
    pub rootless_records: usize,
    /// Similarity edge rows read from the CSV.
    pub similarity_rows_read: usize,
    /// Similarity edges kept (cleared the cutoff, both lemmas present).
    pub similarity_edges_kept: usize,
}

/// One row of the cluster edge CSV.
#[derive(Debug, Deserialize)]
struct EdgeCsvRow {
    #[allow(dead_code)]
    binary_root: String,
    src_lemma: String,
    dst_lemma: String,
    form_sim: f64,
    #[allow(dead_code)]
    meaning_sim: f64,
}

/// Build a lexicon graph from a JSONL lexicon.
///
/// Every record yields a lemma node. Records with a parseable root add a
/// root node plus a `HasRoot` edge, and the root's nucleus (stored
/// `binary_root` if valid, derived otherwise) adds a binary-root node plus
/// a `Nucleus` edge.
pub fn build_graph(
    input: &Path,
    outcome: &mut ExportOutcome,
) -> Result<LexiconGraph, GraphError> {
    if !input.exists() {
        return Err(GraphError::MissingInput(input.to_path_buf()));
    }

    let mut graph = LexiconGraph::new(input);
    for record in JsonlReader::<LexiconRecord>::open(input)? {
        let record = record?;
        outcome.records_read += 1;

        let lemma = record.lemma();
        if lemma.is_empty() {
            continue;
        }
        let lemma_id = graph.ensure_node(NodeKind::Lemma, lemma);

        let root = match record.parsed_root() {
            Ok(root) => root,
            Err(_) => {
                outcome.rootless_records += 1;
                continue;
            }
        };
        let root_id = graph.ensure_node(NodeKind::Root, root.as_str());
        graph.add_edge(lemma_id, root_id.clone(), EdgeKind::HasRoot, None);

        let nucleus = record
            .parsed_binary_root()
            .unwrap_or_else(|_| BinaryRoot::of(&root));
        let nucleus_id = graph.ensure_node(NodeKind::BinaryRoot, nucleus.as_str());
        graph.add_edge(root_id, nucleus_id, EdgeKind::Nucleus, None);
    }
    Ok(graph)
}

/// Attach `SimilarForm` edges from a cluster edge CSV.
///
/// Only pairs whose form similarity clears the cutoff and whose lemmas are
/// both in the graph are kept. Pairs are undirected in the CSV; the edge is
/// stored once, in CSV order.
pub fn attach_similarity_edges(
    graph: &mut LexiconGraph,
    edges_csv: &Path,
    options: &ExportOptions,
    outcome: &mut ExportOutcome,
) -> Result<(), GraphError> {
    if !edges_csv.exists() {
        return Err(GraphError::MissingInput(edges_csv.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(edges_csv).map_err(|e| GraphError::EdgesCsv {
        path: edges_csv.to_path_buf(),
        message: e.to_string(),
    })?;

    for row in reader.deserialize::<EdgeCsvRow>() {
        let row = row.map_err(|e| GraphError::EdgesCsv {
            path: edges_csv.to_path_buf(),
            message: e.to_string(),
        })?;
        outcome.similarity_rows_read += 1;

        if row.form_sim < options.similarity_cutoff {
            continue;
        }
        let src = LexiconGraph::node_id(NodeKind::Lemma, row.src_lemma.trim());
        let dst = LexiconGraph::node_id(NodeKind::Lemma, row.dst_lemma.trim());
        if !graph.nodes.contains_key(&src) || !graph.nodes.contains_key(&dst) {
            continue;
        }
        if graph.add_edge(src, dst, EdgeKind::SimilarForm, Some(row.form_sim)) {
            outcome.similarity_edges_kept += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::jsonl::write_all;
    use tempfile::TempDir;

    fn record(lemma: &str, root: Option<&str>, binary_root: Option<&str>) -> LexiconRecord {
        LexiconRecord {
            lemma: lemma.into(),
            root_norm: root.map(Into::into),
            binary_root: binary_root.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn builds_lemma_root_nucleus_chain() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("lexicon.jsonl");
        write_all(
            &input,
            &[
                record("كتاب", Some("كتب"), Some("كت")),
                record("كاتب", Some("كتب"), None),
                record("دخيل", None, None),
            ],
        )
        .unwrap();

        let mut outcome = ExportOutcome::default();
        let graph = build_graph(&input, &mut outcome).unwrap();

        assert_eq!(outcome.records_read, 3);
        assert_eq!(outcome.rootless_records, 1);

        let stats = graph.stats();
        assert_eq!(stats.lemmas, 3);
        assert_eq!(stats.roots, 1);
        assert_eq!(stats.binary_roots, 1);
        assert_eq!(stats.has_root_edges, 2);
        // The shared root contributes one Nucleus edge.
        assert_eq!(stats.nucleus_edges, 1);
    }

    #[test]
    fn derives_nucleus_when_binary_root_missing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("lexicon.jsonl");
        write_all(&input, &[record("درس", Some("درس"), None)]).unwrap();

        let mut outcome = ExportOutcome::default();
        let graph = build_graph(&input, &mut outcome).unwrap();
        assert!(graph.nodes.contains_key("bin:در"));
    }

    #[test]
    fn similarity_edges_respect_cutoff_and_membership() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("lexicon.jsonl");
        write_all(
            &input,
            &[
                record("كتاب", Some("كتب"), None),
                record("كتابة", Some("كتب"), None),
            ],
        )
        .unwrap();

        let edges_csv = dir.path().join("edges.csv");
        std::fs::write(
            &edges_csv,
            "binary_root,src_lemma,dst_lemma,form_sim,meaning_sim\n\
             كت,كتاب,كتابة,0.750000,0.000000\n\
             كت,كتاب,غائب,0.900000,0.000000\n\
             كت,كتاب,كتابة,0.300000,0.000000\n",
        )
        .unwrap();

        let mut outcome = ExportOutcome::default();
        let mut graph = build_graph(&input, &mut outcome).unwrap();
        attach_similarity_edges(
            &mut graph,
            &edges_csv,
            &ExportOptions::default(),
            &mut outcome,
        )
        .unwrap();

        assert_eq!(outcome.similarity_rows_read, 3);
        // Unknown lemma and sub-cutoff rows are dropped.
        assert_eq!(outcome.similarity_edges_kept, 1);
        assert_eq!(graph.stats().similar_form_edges, 1);
    }

    #[test]
    fn missing_lexicon_is_reported() {
        let mut outcome = ExportOutcome::default();
        let err = build_graph(Path::new("/no/such.jsonl"), &mut outcome).unwrap_err();
        assert!(matches!(err, GraphError::MissingInput(_)));
    }
}
