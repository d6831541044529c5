//! cli::commands::config
//!
//! Handler for `lx config` (get / set / list).
//!
//! `get` and `list` show resolved values (environment > project > global >
//! built-in default). `set` writes to the project config only.

use std::process::ExitCode;

use crate::cli::args::ConfigAction;
use crate::cli::Context;
use crate::core::config::{save_project, set_project_value};
use crate::ui::output;

pub fn execute(ctx: Context, action: ConfigAction) -> anyhow::Result<ExitCode> {
    match action {
        ConfigAction::Get { key } => {
            let value = ctx.config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut project = ctx.config.project.clone();
            set_project_value(&mut project, &key, &value)?;
            save_project(&ctx.paths.root, &project)?;
            output::print(format!("Set {} = {}", key, value), ctx.verbosity);
        }
        ConfigAction::List => {
            for (key, value) in ctx.config.list() {
                println!("{} = {}", key, value);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
