//! pipeline::step
//!
//! Ingest step descriptors and selection.
//!
//! # Model
//!
//! A [`Step`] names a native transform plus its input and output contracts:
//!
//! - `required_all_inputs` must all exist for the step to run
//! - `required_any_inputs` needs at least one present (used for inputs that
//!   can come from the project tree or the resources dir)
//! - `outputs` are what the step promises to produce
//!
//! Steps are selected by `--only` with step names or tags; an empty
//! selection runs everything.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::core::paths::ProjectPaths;

/// The native transform a step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    IngestQuranMorphology,
    EnrichQuranTranslit,
    IngestWordRootMap,
    CleanWordRootMap,
    BuildBinaryRootLexicon,
}

/// One ingest step.
#[derive(Debug, Clone)]
pub struct Step {
    /// Step name, `<tag>:<operation>` (e.g. `arabic:ingest_word_root_map`).
    pub name: &'static str,

    /// Selection tags.
    pub tags: &'static [&'static str],

    /// The transform to run.
    pub kind: StepKind,

    /// Inputs that must all exist.
    pub required_all_inputs: Vec<PathBuf>,

    /// Inputs of which at least one must exist.
    pub required_any_inputs: Vec<PathBuf>,

    /// Files the step produces.
    pub outputs: Vec<PathBuf>,
}

impl Step {
    /// Whether this step matches a selection (empty selection = everything).
    pub fn selected(&self, requested: &BTreeSet<String>) -> bool {
        if requested.is_empty() {
            return true;
        }
        requested.contains(self.name) || self.tags.iter().any(|t| requested.contains(*t))
    }

    /// Inputs that are missing, honoring the all/any split.
    ///
    /// When the any-group has no present member, all of its candidates are
    /// reported so the user sees every location that was tried.
    pub fn missing_inputs(&self) -> Vec<PathBuf> {
        let mut missing: Vec<PathBuf> = self
            .required_all_inputs
            .iter()
            .filter(|p| !p.exists())
            .cloned()
            .collect();
        if !self.required_any_inputs.is_empty()
            && !self.required_any_inputs.iter().any(|p| p.exists())
        {
            missing.extend(self.required_any_inputs.iter().cloned());
        }
        missing
    }
}

/// Parse repeated `--only` values into a selection set.
///
/// Each value may itself be a comma-separated list; whitespace and empty
/// parts are dropped.
pub fn parse_selection(items: &[String]) -> BTreeSet<String> {
    items
        .iter()
        .flat_map(|item| item.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// The ordered list of ingest steps for a project.
pub fn build_steps(paths: &ProjectPaths) -> Vec<Step> {
    vec![
        Step {
            name: "arabic:ingest_quran_morphology",
            tags: &["arabic"],
            kind: StepKind::IngestQuranMorphology,
            required_all_inputs: vec![paths.quran_morphology()],
            required_any_inputs: vec![],
            outputs: vec![paths.quran_lemmas()],
        },
        Step {
            name: "arabic:enrich_quran_translit",
            tags: &["arabic"],
            kind: StepKind::EnrichQuranTranslit,
            required_all_inputs: vec![paths.quran_lemmas()],
            required_any_inputs: vec![],
            outputs: vec![paths.quran_lemmas_enriched()],
        },
        Step {
            name: "arabic:ingest_word_root_map",
            tags: &["arabic"],
            kind: StepKind::IngestWordRootMap,
            required_all_inputs: vec![],
            required_any_inputs: vec![paths.word_root_map_csv()],
            outputs: vec![paths.word_root_map()],
        },
        Step {
            name: "arabic:clean_word_root_map",
            tags: &["arabic"],
            kind: StepKind::CleanWordRootMap,
            required_all_inputs: vec![paths.word_root_map()],
            required_any_inputs: vec![],
            outputs: vec![paths.word_root_map_filtered()],
        },
        Step {
            name: "arabic:build_binary_root_lexicon",
            tags: &["arabic"],
            kind: StepKind::BuildBinaryRootLexicon,
            required_all_inputs: vec![
                paths.word_root_map_filtered(),
                paths.quran_lemmas_enriched(),
            ],
            required_any_inputs: vec![],
            outputs: vec![paths.binary_root_lexicon()],
        },
    ]
}
