//! Binary entry point for `tkt`.

use std::process::ExitCode;

use tkt::ui::output;

fn main() -> ExitCode {
    match tkt::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Full context chain, alternate format: "outer: inner: cause".
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
