//! cli::commands::validate
//!
//! Handler for `lx validate`.
//!
//! Checks every row of a lexicon JSONL file:
//! - the line parses as a record
//! - the lemma is present
//! - `root_norm` (or `root`) is a valid normalized root
//! - `binary_root` is valid and equals the root's two-letter nucleus
//! - no duplicate (lemma, root_norm) pairs
//!
//! Bad rows are counted, not fatal; `--strict` turns any finding into a
//! non-zero exit.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::cli::Context;
use crate::core::types::{BinaryRoot, Lemma};
use crate::lexicon::jsonl::{JsonlError, JsonlReader};
use crate::lexicon::record::LexiconRecord;
use crate::ui::output;

/// Counts of findings from one validation pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub rows: usize,
    pub parse_errors: usize,
    pub missing_lemma: usize,
    pub missing_root: usize,
    pub invalid_root: usize,
    pub missing_binary_root: usize,
    pub invalid_binary_root: usize,
    pub nucleus_mismatch: usize,
    pub duplicates: usize,
}

impl ValidationReport {
    /// Total findings across all categories.
    pub fn findings(&self) -> usize {
        self.parse_errors
            + self.missing_lemma
            + self.missing_root
            + self.invalid_root
            + self.missing_binary_root
            + self.invalid_binary_root
            + self.nucleus_mismatch
            + self.duplicates
    }
}

/// Validate a lexicon file, counting findings per row.
pub fn validate_file(path: &Path) -> Result<ValidationReport, JsonlError> {
    let mut report = ValidationReport::default();
    let mut seen: BTreeSet<(String, String)> = BTreeSet::new();

    for row in JsonlReader::<LexiconRecord>::open(path)? {
        report.rows += 1;
        let record = match row {
            Ok(record) => record,
            Err(JsonlError::Parse { .. }) => {
                report.parse_errors += 1;
                continue;
            }
            Err(other) => return Err(other),
        };

        // Empty lemmas and control-character garbage both count here.
        if Lemma::new(record.lemma()).is_err() {
            report.missing_lemma += 1;
        }

        let root = match record.root_norm() {
            None => {
                report.missing_root += 1;
                None
            }
            Some(_) => match record.parsed_root() {
                Ok(root) => Some(root),
                Err(_) => {
                    report.invalid_root += 1;
                    None
                }
            },
        };

        match (record.binary_root(), &root) {
            (None, _) => report.missing_binary_root += 1,
            (Some(_), _) => match record.parsed_binary_root() {
                Err(_) => report.invalid_binary_root += 1,
                Ok(nucleus) => {
                    if let Some(root) = &root {
                        if nucleus != BinaryRoot::of(root) {
                            report.nucleus_mismatch += 1;
                        }
                    }
                }
            },
        }

        if let Some(root) = &root {
            if !record.lemma().is_empty() {
                let key = (record.lemma().to_string(), root.as_str().to_string());
                if !seen.insert(key) {
                    report.duplicates += 1;
                }
            }
        }
    }
    Ok(report)
}

pub fn execute(ctx: Context, input: Option<PathBuf>, strict: bool) -> anyhow::Result<ExitCode> {
    let input = input.unwrap_or_else(|| ctx.paths.binary_root_lexicon());
    let report = validate_file(&input)?;

    output::print(
        format!("Validated {} rows in {}", report.rows, input.display()),
        ctx.verbosity,
    );
    let categories = [
        ("parse errors", report.parse_errors),
        ("missing lemma", report.missing_lemma),
        ("missing root", report.missing_root),
        ("invalid root", report.invalid_root),
        ("missing binary root", report.missing_binary_root),
        ("invalid binary root", report.invalid_binary_root),
        ("nucleus mismatch", report.nucleus_mismatch),
        ("duplicate (lemma, root)", report.duplicates),
    ];
    for (label, count) in categories {
        if count > 0 {
            output::warn(format!("{}: {}", label, count), ctx.verbosity);
        }
    }

    if report.findings() == 0 {
        output::print("No findings", ctx.verbosity);
        Ok(ExitCode::SUCCESS)
    } else if strict {
        output::error(format!("{} findings", report.findings()));
        Ok(ExitCode::FAILURE)
    } else {
        output::print(format!("{} findings", report.findings()), ctx.verbosity);
        Ok(ExitCode::SUCCESS)
    }
}
