//! core::paths
//!
//! Centralized path routing for the lexicon workspace layout.
//!
//! # Architecture
//!
//! All workspace locations are routed through [`ProjectPaths`] so the data
//! layout is defined in exactly one place. No code outside this module
//! should compute `data/...` or `outputs/...` paths by hand.
//!
//! # Storage Layout
//!
//! Relative to the project root:
//! - `lexroot.toml` - Project configuration
//! - `data/raw/` - Raw source datasets
//! - `data/processed/_intermediate/` - Step-to-step intermediates
//! - `data/processed/` - Canonical processed JSONL files
//! - `outputs/clusters/` - Cluster assignments and similarity edges
//! - `outputs/graph/` - Exported lexicon graph
//! - `outputs/manifests/` - Ingest run manifests
//! - `outputs/.lock` - Exclusive run lock
//!
//! # Example
//!
//! ```
//! use lexroot::core::paths::ProjectPaths;
//! use std::path::PathBuf;
//!
//! let paths = ProjectPaths::new(PathBuf::from("/project"));
//! assert_eq!(
//!     paths.binary_root_lexicon(),
//!     PathBuf::from("/project/data/processed/arabic/arabic_words_binary_roots.jsonl")
//! );
//! ```

use std::path::{Path, PathBuf};

/// Centralized path routing for a lexroot project.
///
/// # Invariants
///
/// - All data and output paths are computed from the project root
/// - External resources are only reachable through [`ProjectPaths::resource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Project root directory (where `lexroot.toml` lives).
    pub root: PathBuf,

    /// Optional external resources directory (`--resources-dir` or
    /// `LC_RESOURCES_DIR`). Raw inputs that ship outside the project are
    /// looked up here first.
    pub resources_dir: Option<PathBuf>,
}

impl ProjectPaths {
    /// Create paths rooted at `root` with no external resources dir.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            resources_dir: None,
        }
    }

    /// Create paths rooted at `root` with an external resources dir.
    pub fn with_resources(root: PathBuf, resources_dir: Option<PathBuf>) -> Self {
        Self {
            root,
            resources_dir,
        }
    }

    /// Project configuration file: `<root>/lexroot.toml`.
    pub fn project_config(&self) -> PathBuf {
        self.root.join("lexroot.toml")
    }

    // =========================================================================
    // Raw inputs
    // =========================================================================

    /// Raw data root: `<root>/data/raw`.
    pub fn data_raw(&self) -> PathBuf {
        self.root.join("data").join("raw")
    }

    /// Quranic corpus morphology source file.
    pub fn quran_morphology(&self) -> PathBuf {
        self.data_raw()
            .join("arabic")
            .join("quran-morphology")
            .join("quran-morphology.txt")
    }

    /// Word-to-root CSV map. Resolved against the resources dir when one is
    /// configured, falling back to `data/raw/arabic/`.
    pub fn word_root_map_csv(&self) -> PathBuf {
        match &self.resources_dir {
            Some(dir) => dir.join("word_root_map.csv"),
            None => self.data_raw().join("arabic").join("word_root_map.csv"),
        }
    }

    /// Resolve a named file against the resources dir, if configured.
    pub fn resource(&self, name: &str) -> Option<PathBuf> {
        self.resources_dir.as_ref().map(|dir| dir.join(name))
    }

    // =========================================================================
    // Processed data
    // =========================================================================

    /// Processed data root: `<root>/data/processed`.
    pub fn data_processed(&self) -> PathBuf {
        self.root.join("data").join("processed")
    }

    /// Intermediate directory for step-to-step files.
    pub fn intermediate_arabic(&self) -> PathBuf {
        self.data_processed().join("_intermediate").join("arabic")
    }

    /// Parsed quran lemmas (intermediate).
    pub fn quran_lemmas(&self) -> PathBuf {
        self.intermediate_arabic().join("quran_lemmas.jsonl")
    }

    /// Ingested word-root map (intermediate).
    pub fn word_root_map(&self) -> PathBuf {
        self.intermediate_arabic().join("word_root_map.jsonl")
    }

    /// Transliteration-enriched quran lemmas.
    pub fn quran_lemmas_enriched(&self) -> PathBuf {
        self.data_processed()
            .join("arabic")
            .join("quran_lemmas_enriched.jsonl")
    }

    /// Cleaned and filtered word-root map.
    pub fn word_root_map_filtered(&self) -> PathBuf {
        self.data_processed()
            .join("arabic")
            .join("word_root_map_filtered.jsonl")
    }

    /// Canonical binary-root lexicon.
    pub fn binary_root_lexicon(&self) -> PathBuf {
        self.data_processed()
            .join("arabic")
            .join("arabic_words_binary_roots.jsonl")
    }

    /// The canonical outputs an ingest run is expected to produce.
    pub fn canonical_outputs(&self) -> Vec<PathBuf> {
        vec![
            self.quran_lemmas_enriched(),
            self.word_root_map_filtered(),
            self.binary_root_lexicon(),
        ]
    }

    // =========================================================================
    // Outputs
    // =========================================================================

    /// Outputs root: `<root>/outputs`.
    pub fn outputs(&self) -> PathBuf {
        self.root.join("outputs")
    }

    /// Cluster outputs directory.
    pub fn clusters_dir(&self) -> PathBuf {
        self.outputs().join("clusters")
    }

    /// Cluster assignment rows.
    pub fn cluster_rows(&self) -> PathBuf {
        self.clusters_dir().join("binary_root_lemma_clusters.jsonl")
    }

    /// Pairwise similarity edges.
    pub fn similarity_edges(&self) -> PathBuf {
        self.clusters_dir().join("binary_root_similarity_edges.csv")
    }

    /// Graph outputs directory.
    pub fn graph_dir(&self) -> PathBuf {
        self.outputs().join("graph")
    }

    /// Exported lexicon graph.
    pub fn lexicon_graph(&self) -> PathBuf {
        self.graph_dir().join("lexicon_graph.json")
    }

    /// Manifests directory.
    pub fn manifests_dir(&self) -> PathBuf {
        self.outputs().join("manifests")
    }

    /// Exclusive run lock file.
    pub fn run_lock(&self) -> PathBuf {
        self.outputs().join(".lock")
    }
}

/// Resolve the project root from an optional `--cwd` override.
///
/// Unlike repository tools, lexroot does not walk upward looking for a
/// marker file: the project root is simply the working directory (or the
/// `--cwd` override). Missing layout pieces surface as missing-input step
/// skips rather than hard errors.
pub fn resolve_root(cwd: Option<&Path>) -> std::io::Result<PathBuf> {
    match cwd {
        Some(path) => Ok(path.to_path_buf()),
        None => std::env::current_dir(),
    }
}
