//! Lexroot - A Rust-native CLI for the Arabic binary-root lexicon pipeline
//!
//! Lexroot is a single-binary tool for building and exploring an Arabic
//! "binary root" lexicon: ingesting raw linguistic sources into canonical
//! JSONL files, clustering lemmas within each binary-root bucket by form and
//! meaning similarity, and exporting the lemma/root/binary-root graph.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to commands)
//! - [`pipeline`] - Ingest step orchestration with manifests and run locking
//! - [`lexicon`] - JSONL record schema, reader/writer, Arabic text normalization
//! - [`cluster`] - Binary-root grouping and similarity subclustering
//! - [`graph`] - Lemma -> root -> binary-root graph construction and export
//! - [`core`] - Domain types, configuration, paths, and the run lock
//! - [`ui`] - User output utilities
//!
//! # Correctness Invariants
//!
//! Lexroot maintains the following invariants:
//!
//! 1. Domain values (lemmas, roots, binary roots) are validated at construction
//! 2. All ingest runs hold the exclusive outputs lock and write a manifest
//! 3. Cluster and edge outputs are deterministic for a given input and thresholds
//! 4. Output files are never interleaved between concurrent runs

pub mod cli;
pub mod cluster;
pub mod core;
pub mod graph;
pub mod lexicon;
pub mod pipeline;
pub mod ui;
