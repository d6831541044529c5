//! cluster
//!
//! Discovery clustering of the lexicon by binary root.
//!
//! # Overview
//!
//! Records are grouped by their `binary_root`. Within each group two
//! independent subclusterings are computed with connected components over
//! thresholded similarity:
//!
//! - **form** clusters: lemma character-bigram Jaccard
//! - **meaning** clusters: gloss token Jaccard
//!
//! # Output Contracts
//!
//! - `binary_root_lemma_clusters.jsonl`: one row per input record carrying
//!   its group and both cluster labels (labels are null when the group was
//!   too large to subcluster)
//! - `binary_root_similarity_edges.csv`: every within-group pair with both
//!   similarities, 6 decimal places
//!
//! Groups larger than `max_group` are emitted without subclusters and
//! without edges; pairwise similarity is quadratic and oversized groups
//! would dominate the run.

pub mod dsu;
pub mod similarity;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::{
    DEFAULT_FORM_THRESHOLD, DEFAULT_MAX_GROUP, DEFAULT_MEANING_THRESHOLD,
};
use crate::lexicon::jsonl::{self, JsonlError, JsonlWriter};
use crate::lexicon::record::LexiconRecord;
use dsu::Dsu;
use similarity::SimilarityMatrix;

/// Errors from the clustering run.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("missing input: {0}")]
    MissingInput(PathBuf),

    #[error(transparent)]
    Jsonl(#[from] JsonlError),

    #[error("failed to write edges csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    /// Within-group threshold for form subclusters.
    pub form_threshold: f64,

    /// Within-group threshold for meaning subclusters.
    pub meaning_threshold: f64,

    /// Skip similarity and subclustering for groups larger than this.
    pub max_group: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            form_threshold: DEFAULT_FORM_THRESHOLD,
            meaning_threshold: DEFAULT_MEANING_THRESHOLD,
            max_group: DEFAULT_MAX_GROUP,
        }
    }
}

/// One output row of the cluster assignment file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterRow {
    pub binary_root: String,
    pub lemma: String,
    pub root_norm: String,
    pub form_cluster: Option<usize>,
    pub meaning_cluster: Option<usize>,
    pub language: String,
    pub stage: String,
    pub script: String,
    pub source: String,
}

/// Summary of a clustering run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterOutcome {
    /// Total input rows read.
    pub records_read: usize,
    /// Rows skipped for lacking a binary root.
    pub skipped_no_binary_root: usize,
    /// Distinct binary-root groups.
    pub groups: usize,
    /// Groups emitted without subclusters (size > max_group).
    pub oversized_groups: usize,
    /// Assignment rows written.
    pub rows_written: usize,
    /// Similarity edges written.
    pub edges_written: usize,
}

/// A record trimmed down to the fields clustering needs.
#[derive(Debug, Clone)]
struct Member {
    lemma: String,
    root_norm: String,
    gloss: String,
    language: String,
    stage: String,
    script: String,
    source: String,
}

impl Member {
    fn from_record(record: &LexiconRecord) -> Self {
        let field = |opt: Option<&str>| opt.unwrap_or("").to_string();
        Self {
            lemma: record.lemma().to_string(),
            root_norm: field(record.root_norm()),
            gloss: field(record.gloss()),
            language: field(record.language.as_deref().map(str::trim)),
            stage: field(record.stage.as_deref().map(str::trim)),
            script: field(record.script.as_deref().map(str::trim)),
            source: field(record.source.as_deref().map(str::trim)),
        }
    }

    fn row(&self, binary_root: &str, form: Option<usize>, meaning: Option<usize>) -> ClusterRow {
        ClusterRow {
            binary_root: binary_root.to_string(),
            lemma: self.lemma.clone(),
            root_norm: self.root_norm.clone(),
            form_cluster: form,
            meaning_cluster: meaning,
            language: self.language.clone(),
            stage: self.stage.clone(),
            script: self.script.clone(),
            source: self.source.clone(),
        }
    }
}

/// Connected-component labels from a thresholded similarity matrix.
///
/// Pairs with similarity >= `threshold` are joined; labels are compacted
/// in first-seen order.
pub fn cluster_labels(matrix: &SimilarityMatrix, threshold: f64) -> Vec<usize> {
    let n = matrix.len();
    let mut dsu = Dsu::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if matrix.get(i, j) >= threshold {
                dsu.union(i, j);
            }
        }
    }
    dsu.compact_labels()
}

/// Run binary-root clustering over a lexicon file.
///
/// Writes the assignment JSONL and edge CSV into `out_dir` and returns the
/// run summary.
pub fn run(
    input: &Path,
    out_dir: &Path,
    params: &ClusterParams,
) -> Result<ClusterOutcome, ClusterError> {
    if !input.exists() {
        return Err(ClusterError::MissingInput(input.to_path_buf()));
    }
    std::fs::create_dir_all(out_dir)?;

    let mut outcome = ClusterOutcome::default();

    // Group by binary root. BTreeMap keeps group emission deterministic.
    let mut groups: BTreeMap<String, Vec<Member>> = BTreeMap::new();
    for record in jsonl::JsonlReader::<LexiconRecord>::open(input)? {
        let record = record?;
        outcome.records_read += 1;
        match record.binary_root() {
            Some(br) => groups
                .entry(br.to_string())
                .or_default()
                .push(Member::from_record(&record)),
            None => outcome.skipped_no_binary_root += 1,
        }
    }
    outcome.groups = groups.len();

    let rows_path = out_dir.join("binary_root_lemma_clusters.jsonl");
    let edges_path = out_dir.join("binary_root_similarity_edges.csv");

    let mut rows_out = JsonlWriter::create(&rows_path)?;
    let mut edges_out = csv::Writer::from_path(&edges_path)?;
    edges_out.write_record(["binary_root", "src_lemma", "dst_lemma", "form_sim", "meaning_sim"])?;

    for (binary_root, members) in &groups {
        if members.len() > params.max_group {
            // Oversized groups get rows but neither subclusters nor edges.
            outcome.oversized_groups += 1;
            for member in members {
                rows_out.write(&member.row(binary_root, None, None))?;
                outcome.rows_written += 1;
            }
            continue;
        }

        let lemmas: Vec<&str> = members.iter().map(|m| m.lemma.as_str()).collect();
        let glosses: Vec<&str> = members.iter().map(|m| m.gloss.as_str()).collect();
        let form_sim = similarity::form_matrix(&lemmas);
        let meaning_sim = similarity::meaning_matrix(&glosses);
        let form_labels = cluster_labels(&form_sim, params.form_threshold);
        let meaning_labels = cluster_labels(&meaning_sim, params.meaning_threshold);

        for (idx, member) in members.iter().enumerate() {
            rows_out.write(&member.row(
                binary_root,
                Some(form_labels[idx]),
                Some(meaning_labels[idx]),
            ))?;
            outcome.rows_written += 1;
        }

        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                edges_out.write_record([
                    binary_root.as_str(),
                    members[i].lemma.as_str(),
                    members[j].lemma.as_str(),
                    &format!("{:.6}", form_sim.get(i, j)),
                    &format!("{:.6}", meaning_sim.get(i, j)),
                ])?;
                outcome.edges_written += 1;
            }
        }
    }

    rows_out.finish()?;
    edges_out.flush().map_err(ClusterError::Io)?;
    Ok(outcome)
}
