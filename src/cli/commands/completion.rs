//! cli::commands::completion
//!
//! Handler for `lx completion`.

use std::process::ExitCode;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::args::Cli;

pub fn execute(shell: Shell) -> anyhow::Result<ExitCode> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(ExitCode::SUCCESS)
}
