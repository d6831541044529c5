//! pipeline::steps
//!
//! Native ingest transforms.
//!
//! Each submodule implements one [`StepKind`](crate::pipeline::step::StepKind)
//! as a function from the project paths (and config) to rows written. The
//! runner owns ordering, gating, and manifests; steps only transform files.

pub mod binary_root_lexicon;
pub mod quran_morphology;
pub mod translit;
pub mod word_root_map;

use std::path::PathBuf;

use thiserror::Error;

use crate::core::config::Config;
use crate::core::paths::ProjectPaths;
use crate::lexicon::jsonl::JsonlError;
use crate::pipeline::step::StepKind;

/// Errors from step execution.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("{path}:{line}: {message}")]
    Format {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("failed to read csv '{path}': {message}")]
    Csv { path: PathBuf, message: String },

    #[error(transparent)]
    Jsonl(#[from] JsonlError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Execute a step, returning the number of rows written.
pub fn execute(kind: StepKind, paths: &ProjectPaths, config: &Config) -> Result<usize, StepError> {
    match kind {
        StepKind::IngestQuranMorphology => quran_morphology::run(paths, config),
        StepKind::EnrichQuranTranslit => translit::run(paths),
        StepKind::IngestWordRootMap => word_root_map::ingest(paths, config),
        StepKind::CleanWordRootMap => word_root_map::clean(paths),
        StepKind::BuildBinaryRootLexicon => binary_root_lexicon::run(paths),
    }
}
