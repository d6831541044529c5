use std::process::ExitCode;

fn main() -> ExitCode {
    match lexroot::cli::run() {
        Ok(code) => code,
        Err(err) => {
            lexroot::ui::output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
