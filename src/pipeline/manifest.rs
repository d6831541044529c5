//! pipeline::manifest
//!
//! Ingest run manifests.
//!
//! # Purpose
//!
//! Every ingest run records what was requested, what each step did, and
//! the state of the canonical outputs (including a sha256 fingerprint) to
//! `outputs/manifests/ingest_run_<UTC ts>.json`. Manifests are append-only
//! history; nothing reads them back programmatically.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from manifest writing.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to write manifest '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Outcome of one step in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Ok,
    Failed,
    Skipped,
}

/// Per-step record in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestStep {
    pub name: String,
    pub status: StepStatus,

    /// Why the step was skipped or failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Inputs that were missing, when that is the reason.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub missing_inputs: Vec<String>,

    /// Wall-clock duration, seconds (executed steps only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_s: Option<f64>,

    /// Rows written by the step (executed steps only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_written: Option<usize>,
}

/// State of one canonical output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputStat {
    pub path: String,
    pub exists: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,

    /// Hex sha256 of the file contents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl OutputStat {
    /// Stat and fingerprint a file. Missing files yield `exists: false`.
    pub fn for_file(path: &Path) -> Self {
        let display = path.display().to_string();
        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(_) => {
                return Self {
                    path: display,
                    exists: false,
                    bytes: None,
                    sha256: None,
                }
            }
        };
        Self {
            path: display,
            exists: true,
            bytes: Some(meta.len()),
            sha256: sha256_of(path).ok(),
        }
    }
}

fn sha256_of(path: &Path) -> std::io::Result<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// A complete ingest run record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    #[serde(rename = "type")]
    pub kind: String,

    /// Unique id for this run.
    pub run_id: String,

    /// RFC3339 UTC start timestamp.
    pub timestamp_utc: String,

    pub project_root: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_dir: Option<String>,

    /// The `--only` selection, sorted.
    pub requested: Vec<String>,

    pub steps: Vec<ManifestStep>,

    pub outputs: Vec<OutputStat>,
}

impl RunManifest {
    /// Start a manifest for a run beginning now.
    pub fn start(project_root: &Path, resources_dir: Option<&Path>, requested: Vec<String>) -> Self {
        Self {
            kind: "ingest_run".to_string(),
            run_id: uuid::Uuid::new_v4().to_string(),
            timestamp_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            project_root: project_root.display().to_string(),
            resources_dir: resources_dir.map(|p| p.display().to_string()),
            requested,
            steps: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Record the state of the canonical outputs.
    pub fn stat_outputs(&mut self, outputs: &[PathBuf]) {
        self.outputs = outputs.iter().map(|p| OutputStat::for_file(p)).collect();
    }

    /// Write the manifest into `manifests_dir`, returning its path.
    pub fn write(&self, manifests_dir: &Path) -> Result<PathBuf, ManifestError> {
        fs::create_dir_all(manifests_dir).map_err(|source| ManifestError::WriteFailed {
            path: manifests_dir.to_path_buf(),
            source,
        })?;
        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let path = manifests_dir.join(format!("ingest_run_{}.json", stamp));
        let body = serde_json::to_string_pretty(self)?;
        fs::write(&path, body).map_err(|source| ManifestError::WriteFailed {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn output_stat_fingerprints_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("out.jsonl");
        fs::write(&file, b"hello\n").unwrap();

        let stat = OutputStat::for_file(&file);
        assert!(stat.exists);
        assert_eq!(stat.bytes, Some(6));
        // sha256 of "hello\n"
        assert_eq!(
            stat.sha256.as_deref(),
            Some("5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03")
        );
    }

    #[test]
    fn output_stat_handles_missing_files() {
        let stat = OutputStat::for_file(Path::new("/no/such/file"));
        assert!(!stat.exists);
        assert!(stat.bytes.is_none());
        assert!(stat.sha256.is_none());
    }

    #[test]
    fn manifest_round_trips_and_writes() {
        let dir = TempDir::new().unwrap();
        let mut manifest = RunManifest::start(dir.path(), None, vec!["arabic".into()]);
        manifest.steps.push(ManifestStep {
            name: "arabic:clean_word_root_map".into(),
            status: StepStatus::Skipped,
            reason: Some("missing_inputs".into()),
            missing_inputs: vec!["/p/in.jsonl".into()],
            duration_s: None,
            rows_written: None,
        });
        manifest.stat_outputs(&[dir.path().join("absent.jsonl")]);

        let path = manifest.write(&dir.path().join("manifests")).unwrap();
        let body = fs::read_to_string(&path).unwrap();
        let parsed: RunManifest = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.kind, "ingest_run");
        assert_eq!(parsed.steps.len(), 1);
        assert_eq!(parsed.steps[0].status, StepStatus::Skipped);
        assert!(!parsed.outputs[0].exists);
    }
}
