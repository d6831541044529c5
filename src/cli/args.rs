//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use clap_complete::Shell;

/// Lexroot - A Rust-native CLI for the Arabic binary-root lexicon pipeline
#[derive(Parser, Debug)]
#[command(name = "lexroot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if lexroot was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the ingest pipeline (raw sources -> canonical lexicon)
    #[command(
        name = "ingest",
        long_about = "Run the ingest pipeline.\n\n\
            Ingest transforms raw linguistic sources under data/raw/ into the \
            canonical processed JSONL files under data/processed/, ending with \
            the binary-root lexicon. Steps with missing inputs are skipped by \
            default so partial projects still make progress; every run writes \
            a manifest recording what happened.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Run everything that has inputs available
    lx ingest

    # See the available steps without running anything
    lx ingest --list

    # Run only the word-root map steps
    lx ingest --only arabic:ingest_word_root_map,arabic:clean_word_root_map

    # Use an external datasets folder and stop on the first failure
    lx ingest --resources-dir /datasets/arabic --fail-fast

EXIT CODES:
    0  all selected steps succeeded or were skipped
    2  at least one step failed"
    )]
    Ingest {
        /// Comma-separated step names or tags to run (repeatable)
        #[arg(long, value_name = "STEP_OR_TAG")]
        only: Vec<String>,

        /// List available steps and exit
        #[arg(long)]
        list: bool,

        /// Fail if any required inputs are missing
        #[arg(long)]
        require_inputs: bool,

        /// Stop at the first failed step
        #[arg(long)]
        fail_fast: bool,

        /// External datasets folder (also honored via LC_RESOURCES_DIR)
        #[arg(long, value_name = "DIR")]
        resources_dir: Option<PathBuf>,

        /// Do not write a run manifest
        #[arg(long)]
        no_manifest: bool,
    },

    /// Cluster the lexicon by binary root
    #[command(
        name = "cluster",
        long_about = "Cluster the lexicon by binary root.\n\n\
            Groups lexicon records by their two-letter root nucleus, then \
            subclusters each group twice: by lemma form (character-bigram \
            similarity) and by gloss meaning (token similarity). Produces one \
            JSONL row per record with both cluster labels, plus a CSV of all \
            within-group similarity edges for inspection.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Cluster the canonical lexicon with default thresholds
    lx cluster

    # Tighter form clusters on a custom file
    lx cluster --input my_lexicon.jsonl --form-threshold 0.7

    # Allow large groups to be subclustered (quadratic - use with care)
    lx cluster --max-group 2000"
    )]
    Cluster {
        /// Input lexicon JSONL (defaults to the canonical lexicon)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output directory (defaults to outputs/clusters)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Within-group threshold for form subclusters
        #[arg(long, value_name = "T")]
        form_threshold: Option<f64>,

        /// Within-group threshold for meaning subclusters
        #[arg(long, value_name = "T")]
        meaning_threshold: Option<f64>,

        /// Skip subclustering for groups larger than this
        #[arg(long, value_name = "N")]
        max_group: Option<usize>,
    },

    /// Export the lemma -> root -> binary-root graph
    #[command(
        name = "graph",
        long_about = "Export the lexicon graph.\n\n\
            Builds lemma, root, and binary-root nodes with HasRoot and \
            Nucleus edges from the lexicon, optionally attaches weighted \
            SimilarForm edges from a previous cluster run, and writes the \
            whole graph as one JSON artifact.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Export the graph from the canonical lexicon
    lx graph

    # Include similarity edges from the last cluster run
    lx graph --with-similarity

    # Keep only strong similarity edges
    lx graph --with-similarity --similarity-cutoff 0.8"
    )]
    Graph {
        /// Input lexicon JSONL (defaults to the canonical lexicon)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output JSON path (defaults to outputs/graph/lexicon_graph.json)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Attach SimilarForm edges from the cluster edge CSV
        #[arg(long)]
        with_similarity: bool,

        /// Cluster edge CSV (defaults to the last cluster run's output)
        #[arg(long, value_name = "FILE", requires = "with_similarity")]
        edges: Option<PathBuf>,

        /// Minimum form similarity for a SimilarForm edge
        #[arg(long, value_name = "T", default_value_t = 0.5)]
        similarity_cutoff: f64,
    },

    /// Validate a lexicon JSONL file against the record schema
    #[command(
        name = "validate",
        long_about = "Validate a lexicon JSONL file.\n\n\
            Checks every row for parseability, a lemma, a valid normalized \
            root, a valid binary root consistent with the root's nucleus, and \
            duplicate (lemma, root) pairs. Prints a summary of findings.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Check the canonical lexicon
    lx validate

    # Gate a CI pipeline on a clean lexicon
    lx validate --strict"
    )]
    Validate {
        /// Input lexicon JSONL (defaults to the canonical lexicon)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Exit non-zero if any finding is reported
        #[arg(long)]
        strict: bool,
    },

    /// Show binary-root bucket statistics for a lexicon
    #[command(name = "stats")]
    Stats {
        /// Input lexicon JSONL (defaults to the canonical lexicon)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Number of buckets to show
        #[arg(long, value_name = "N", default_value_t = 20)]
        top: usize,
    },

    /// Get and set configuration values
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(name = "completion")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommand actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved value for a key
    Get {
        /// Config key (e.g. cluster.form_threshold)
        key: String,
    },

    /// Set a key in the project config (lexroot.toml)
    Set {
        /// Config key (e.g. cluster.form_threshold)
        key: String,
        /// New value
        value: String,
    },

    /// List all keys with their resolved values
    List,
}
