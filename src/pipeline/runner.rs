//! pipeline::runner
//!
//! Ingest run orchestration.
//!
//! # Lifecycle
//!
//! 1. Acquire the exclusive run lock
//! 2. Build and select steps
//! 3. For each step: check inputs, execute or skip, record the outcome
//! 4. Stat the canonical outputs and write the manifest
//!
//! Steps never run concurrently and never partially: a step either
//! produces its outputs or is recorded as failed. A failed step does not
//! stop the run unless `fail_fast` is set; later steps that depended on
//! its outputs will skip on missing inputs.

use std::path::PathBuf;
use std::time::Instant;

use thiserror::Error;

use crate::core::config::Config;
use crate::core::lock::{LockError, RunLock};
use crate::core::paths::ProjectPaths;
use crate::pipeline::manifest::{ManifestError, ManifestStep, RunManifest, StepStatus};
use crate::pipeline::step::{build_steps, parse_selection, Step};
use crate::pipeline::steps;
use crate::ui::output::{self, Verbosity};

/// Errors that abort an ingest run before any step executes.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Options for an ingest run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Step names or tags to run (empty = all).
    pub only: Vec<String>,

    /// Fail (rather than skip) steps with missing inputs.
    pub require_inputs: bool,

    /// Stop at the first failed step.
    pub fail_fast: bool,

    /// Write a run manifest.
    pub write_manifest: bool,
}

/// Report for one step of a run.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: String,
    pub status: StepStatus,
    pub reason: Option<String>,
    pub missing_inputs: Vec<PathBuf>,
    pub duration_s: Option<f64>,
    pub rows_written: Option<usize>,
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    pub steps: Vec<StepReport>,
    pub any_failed: bool,
    pub manifest_path: Option<PathBuf>,
}

impl RunSummary {
    /// Count of steps with a given status.
    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }
}

/// List the available steps (for `lx ingest --list`).
pub fn list_steps(paths: &ProjectPaths) -> Vec<(String, Vec<String>)> {
    build_steps(paths)
        .iter()
        .map(|step| {
            (
                step.name.to_string(),
                step.tags.iter().map(|t| t.to_string()).collect(),
            )
        })
        .collect()
}

/// Execute an ingest run.
pub fn run(
    paths: &ProjectPaths,
    config: &Config,
    options: &RunOptions,
    verbosity: Verbosity,
) -> Result<RunSummary, RunnerError> {
    let _lock = RunLock::acquire(paths)?;

    let requested = parse_selection(&options.only);
    let mut manifest = RunManifest::start(
        &paths.root,
        paths.resources_dir.as_deref(),
        requested.iter().cloned().collect(),
    );

    let mut reports = Vec::new();
    let mut any_failed = false;

    for step in build_steps(paths) {
        if !step.selected(&requested) {
            reports.push(skip(&step, "not_selected", vec![]));
            continue;
        }

        let missing = step.missing_inputs();
        if !missing.is_empty() {
            if options.require_inputs {
                output::error(format!("{}: missing inputs", step.name));
                reports.push(fail(&step, "missing_inputs", missing));
                any_failed = true;
                if options.fail_fast {
                    break;
                }
            } else {
                output::debug(
                    format!("skipping {} (missing inputs)", step.name),
                    verbosity,
                );
                reports.push(skip(&step, "missing_inputs", missing));
            }
            continue;
        }

        output::print(format!("Running: {}", step.name), verbosity);
        let start = Instant::now();
        match steps::execute(step.kind, paths, config) {
            Ok(rows) => {
                let duration = start.elapsed().as_secs_f64();
                output::debug(
                    format!("{}: {} rows in {:.3}s", step.name, rows, duration),
                    verbosity,
                );
                reports.push(StepReport {
                    name: step.name.to_string(),
                    status: StepStatus::Ok,
                    reason: None,
                    missing_inputs: vec![],
                    duration_s: Some(duration),
                    rows_written: Some(rows),
                });
            }
            Err(err) => {
                output::error(format!("{}: {}", step.name, err));
                reports.push(StepReport {
                    name: step.name.to_string(),
                    status: StepStatus::Failed,
                    reason: Some(err.to_string()),
                    missing_inputs: vec![],
                    duration_s: Some(start.elapsed().as_secs_f64()),
                    rows_written: None,
                });
                any_failed = true;
                if options.fail_fast {
                    break;
                }
            }
        }
    }

    for report in &reports {
        manifest.steps.push(ManifestStep {
            name: report.name.clone(),
            status: report.status,
            reason: report.reason.clone(),
            missing_inputs: report
                .missing_inputs
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            duration_s: report.duration_s,
            rows_written: report.rows_written,
        });
    }
    manifest.stat_outputs(&paths.canonical_outputs());

    let manifest_path = if options.write_manifest {
        let path = manifest.write(&paths.manifests_dir())?;
        output::print(format!("Wrote manifest: {}", path.display()), verbosity);
        Some(path)
    } else {
        None
    };

    Ok(RunSummary {
        steps: reports,
        any_failed,
        manifest_path,
    })
}

fn skip(step: &Step, reason: &str, missing: Vec<PathBuf>) -> StepReport {
    StepReport {
        name: step.name.to_string(),
        status: StepStatus::Skipped,
        reason: Some(reason.to_string()),
        missing_inputs: missing,
        duration_s: None,
        rows_written: None,
    }
}

fn fail(step: &Step, reason: &str, missing: Vec<PathBuf>) -> StepReport {
    StepReport {
        name: step.name.to_string(),
        status: StepStatus::Failed,
        reason: Some(reason.to_string()),
        missing_inputs: missing,
        duration_s: None,
        rows_written: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options() -> RunOptions {
        RunOptions {
            write_manifest: false,
            ..Default::default()
        }
    }

    #[test]
    fn empty_project_skips_everything() {
        let dir = TempDir::new().unwrap();
        let paths = ProjectPaths::new(dir.path().to_path_buf());

        let summary = run(&paths, &Config::default(), &options(), Verbosity::Quiet).unwrap();
        assert!(!summary.any_failed);
        assert_eq!(summary.count(StepStatus::Skipped), 5);
        assert!(summary.manifest_path.is_none());
    }

    #[test]
    fn require_inputs_turns_skips_into_failures() {
        let dir = TempDir::new().unwrap();
        let paths = ProjectPaths::new(dir.path().to_path_buf());

        let opts = RunOptions {
            require_inputs: true,
            ..options()
        };
        let summary = run(&paths, &Config::default(), &opts, Verbosity::Quiet).unwrap();
        assert!(summary.any_failed);
        assert_eq!(summary.count(StepStatus::Failed), 5);
    }

    #[test]
    fn fail_fast_stops_after_first_failure() {
        let dir = TempDir::new().unwrap();
        let paths = ProjectPaths::new(dir.path().to_path_buf());

        let opts = RunOptions {
            require_inputs: true,
            fail_fast: true,
            ..options()
        };
        let summary = run(&paths, &Config::default(), &opts, Verbosity::Quiet).unwrap();
        assert_eq!(summary.steps.len(), 1);
        assert!(summary.any_failed);
    }

    #[test]
    fn selection_limits_execution() {
        let dir = TempDir::new().unwrap();
        let paths = ProjectPaths::new(dir.path().to_path_buf());

        let opts = RunOptions {
            only: vec!["arabic:clean_word_root_map".into()],
            ..options()
        };
        let summary = run(&paths, &Config::default(), &opts, Verbosity::Quiet).unwrap();
        let not_selected = summary
            .steps
            .iter()
            .filter(|s| s.reason.as_deref() == Some("not_selected"))
            .count();
        assert_eq!(not_selected, 4);
    }

    #[test]
    fn runs_available_steps_and_writes_manifest() {
        let dir = TempDir::new().unwrap();
        let paths = ProjectPaths::new(dir.path().to_path_buf());

        let csv_path = paths.word_root_map_csv();
        std::fs::create_dir_all(csv_path.parent().unwrap()).unwrap();
        std::fs::write(&csv_path, "word,root\nكتاب,كتب\n").unwrap();

        let opts = RunOptions {
            write_manifest: true,
            ..Default::default()
        };
        let summary = run(&paths, &Config::default(), &opts, Verbosity::Quiet).unwrap();
        assert!(!summary.any_failed);
        // CSV ingest and clean run; the quran and join steps lack inputs.
        assert_eq!(summary.count(StepStatus::Ok), 2);
        assert_eq!(summary.count(StepStatus::Skipped), 3);
        assert!(paths.word_root_map_filtered().exists());
        assert!(summary.manifest_path.unwrap().exists());
    }
}
