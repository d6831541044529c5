//! cli
//!
//! Command-line interface layer.
//!
//! `run` parses arguments, resolves the project root and configuration,
//! and dispatches to the command handlers. Handlers return the process
//! exit code so commands with documented non-zero codes (`ingest`,
//! `validate --strict`) can report without treating the outcome as an
//! error.

pub mod args;
pub mod commands;

use std::process::ExitCode;

use anyhow::Context as _;

use crate::core::config::Config;
use crate::core::paths::{self, ProjectPaths};
use crate::ui::output::{self, Verbosity};

/// Resolved invocation context shared by all command handlers.
pub struct Context {
    pub paths: ProjectPaths,
    pub config: Config,
    pub verbosity: Verbosity,
}

/// Entry point: parse arguments and dispatch.
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = args::Cli::parse_args();

    let root = paths::resolve_root(cli.cwd.as_deref())
        .context("failed to resolve the working directory")?;
    let loaded = Config::load(Some(&root)).context("failed to load configuration")?;

    let quiet = cli.quiet || loaded.config.quiet();
    let verbosity = Verbosity::from_flags(quiet, cli.debug);
    for warning in &loaded.warnings {
        output::warn(warning, verbosity);
    }

    let ctx = Context {
        paths: ProjectPaths::with_resources(root, loaded.config.resources_dir()),
        config: loaded.config,
        verbosity,
    };
    commands::dispatch(cli.command, ctx)
}
