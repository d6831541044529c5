//! pipeline
//!
//! Ingest step orchestration.
//!
//! # Architecture
//!
//! The pipeline turns raw linguistic sources into the canonical processed
//! lexicon through an ordered list of gated steps:
//!
//! 1. **Select**: `--only` narrows by step name or tag
//! 2. **Gate**: required inputs are checked; absent inputs skip (or fail
//!    with `--require-inputs`)
//! 3. **Execute**: the step's native transform runs
//! 4. **Record**: outcome, duration, and output fingerprints go into the
//!    run manifest
//!
//! The whole run holds the exclusive outputs lock.

pub mod manifest;
pub mod runner;
pub mod step;
pub mod steps;

pub use manifest::{RunManifest, StepStatus};
pub use runner::{run, RunOptions, RunSummary};
pub use step::{build_steps, Step, StepKind};
