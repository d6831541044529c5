//! cli::commands::cluster
//!
//! Handler for `lx cluster`.

use std::path::PathBuf;
use std::process::ExitCode;

use crate::cli::Context;
use crate::cluster::{self, ClusterParams};
use crate::ui::output;

pub fn execute(
    ctx: Context,
    input: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    form_threshold: Option<f64>,
    meaning_threshold: Option<f64>,
    max_group: Option<usize>,
) -> anyhow::Result<ExitCode> {
    let input = input.unwrap_or_else(|| ctx.paths.binary_root_lexicon());
    let out_dir = out_dir.unwrap_or_else(|| ctx.paths.clusters_dir());

    // Flags beat config, config beats built-in defaults.
    let params = ClusterParams {
        form_threshold: form_threshold.unwrap_or_else(|| ctx.config.form_threshold()),
        meaning_threshold: meaning_threshold.unwrap_or_else(|| ctx.config.meaning_threshold()),
        max_group: max_group.unwrap_or_else(|| ctx.config.max_group()),
    };
    anyhow::ensure!(
        (0.0..=1.0).contains(&params.form_threshold)
            && (0.0..=1.0).contains(&params.meaning_threshold),
        "thresholds must be between 0.0 and 1.0"
    );

    let outcome = cluster::run(&input, &out_dir, &params)?;

    output::print(
        format!(
            "Clustered {} records into {} binary-root groups ({} oversized)",
            outcome.records_read, outcome.groups, outcome.oversized_groups,
        ),
        ctx.verbosity,
    );
    output::print(
        format!(
            "Wrote {} rows and {} similarity edges to {}",
            outcome.rows_written,
            outcome.edges_written,
            out_dir.display(),
        ),
        ctx.verbosity,
    );
    if outcome.skipped_no_binary_root > 0 {
        output::warn(
            format!(
                "{} records lacked a binary root and were skipped",
                outcome.skipped_no_binary_root
            ),
            ctx.verbosity,
        );
    }
    Ok(ExitCode::SUCCESS)
}
