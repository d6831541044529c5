//! cli::commands
//!
//! One module per subcommand. Each handler takes the resolved [`Context`]
//! and returns the process exit code.

pub mod cluster;
pub mod completion;
pub mod config;
pub mod graph;
pub mod ingest;
pub mod stats;
pub mod validate;

use std::process::ExitCode;

use crate::cli::args::Command;
use crate::cli::Context;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: Command, ctx: Context) -> anyhow::Result<ExitCode> {
    match command {
        Command::Ingest {
            only,
            list,
            require_inputs,
            fail_fast,
            resources_dir,
            no_manifest,
        } => ingest::execute(
            ctx,
            only,
            list,
            require_inputs,
            fail_fast,
            resources_dir,
            no_manifest,
        ),
        Command::Cluster {
            input,
            out_dir,
            form_threshold,
            meaning_threshold,
            max_group,
        } => cluster::execute(ctx, input, out_dir, form_threshold, meaning_threshold, max_group),
        Command::Graph {
            input,
            output,
            with_similarity,
            edges,
            similarity_cutoff,
        } => graph::execute(ctx, input, output, with_similarity, edges, similarity_cutoff),
        Command::Validate { input, strict } => validate::execute(ctx, input, strict),
        Command::Stats { input, top } => stats::execute(ctx, input, top),
        Command::Config { action } => config::execute(ctx, action),
        Command::Completion { shell } => completion::execute(shell),
    }
}
