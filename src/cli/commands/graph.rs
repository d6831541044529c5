//! cli::commands::graph
//!
//! Handler for `lx graph`.

use std::path::PathBuf;
use std::process::ExitCode;

use crate::cli::Context;
use crate::graph::export::{self, ExportOptions, ExportOutcome};
use crate::ui::output;

pub fn execute(
    ctx: Context,
    input: Option<PathBuf>,
    output_path: Option<PathBuf>,
    with_similarity: bool,
    edges: Option<PathBuf>,
    similarity_cutoff: f64,
) -> anyhow::Result<ExitCode> {
    let input = input.unwrap_or_else(|| ctx.paths.binary_root_lexicon());
    let output_path = output_path.unwrap_or_else(|| ctx.paths.lexicon_graph());

    let mut outcome = ExportOutcome::default();
    let mut graph = export::build_graph(&input, &mut outcome)?;

    if with_similarity {
        let edges_csv = edges.unwrap_or_else(|| ctx.paths.similarity_edges());
        let options = ExportOptions { similarity_cutoff };
        export::attach_similarity_edges(&mut graph, &edges_csv, &options, &mut outcome)?;
    }

    graph.save_to_file(&output_path)?;

    let stats = graph.stats();
    output::print(
        format!(
            "Graph: {} lemmas, {} roots, {} binary roots",
            stats.lemmas, stats.roots, stats.binary_roots,
        ),
        ctx.verbosity,
    );
    output::print(
        format!(
            "Edges: {} has_root, {} nucleus, {} similar_form",
            stats.has_root_edges, stats.nucleus_edges, stats.similar_form_edges,
        ),
        ctx.verbosity,
    );
    if with_similarity {
        output::debug(
            format!(
                "similarity: {} rows read, {} edges kept",
                outcome.similarity_rows_read, outcome.similarity_edges_kept,
            ),
            ctx.verbosity,
        );
    }
    output::print(format!("Wrote {}", output_path.display()), ctx.verbosity);
    Ok(ExitCode::SUCCESS)
}
