//! cli::commands::ingest
//!
//! Handler for `lx ingest`.

use std::path::PathBuf;
use std::process::ExitCode;

use crate::cli::Context;
use crate::core::paths::ProjectPaths;
use crate::pipeline::manifest::StepStatus;
use crate::pipeline::runner::{self, RunOptions};
use crate::ui::output;

/// Exit code when at least one step failed.
const EXIT_STEP_FAILED: u8 = 2;

pub fn execute(
    ctx: Context,
    only: Vec<String>,
    list: bool,
    require_inputs: bool,
    fail_fast: bool,
    resources_dir: Option<PathBuf>,
    no_manifest: bool,
) -> anyhow::Result<ExitCode> {
    // --resources-dir beats the configured/environment value.
    let paths = match resources_dir {
        Some(dir) => ProjectPaths::with_resources(ctx.paths.root.clone(), Some(dir)),
        None => ctx.paths,
    };

    if list {
        for (name, tags) in runner::list_steps(&paths) {
            println!("{}  [{}]", name, tags.join(", "));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let options = RunOptions {
        only,
        require_inputs,
        fail_fast,
        write_manifest: !no_manifest,
    };
    let summary = runner::run(&paths, &ctx.config, &options, ctx.verbosity)?;

    output::print(
        format!(
            "Ingest complete: {} ok, {} skipped, {} failed",
            summary.count(StepStatus::Ok),
            summary.count(StepStatus::Skipped),
            summary.count(StepStatus::Failed),
        ),
        ctx.verbosity,
    );

    if summary.any_failed {
        Ok(ExitCode::from(EXIT_STEP_FAILED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
