mod cli;
mod commands;
mod error;
mod launch;
mod logging;
mod model;
mod registry;
mod selector;
mod store;
mod tui;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use cli::Cli;
use error::Error;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // usage errors exit zero
            println!("{}", usage_line(&e));
            return ExitCode::SUCCESS;
        }
    };

    if let Err(err) = logging::init(cli.verbose) {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let user_error = err
                .downcast_ref::<Error>()
                .is_some_and(Error::is_user_error);
            if user_error {
                println!("{err}");
                ExitCode::SUCCESS
            } else {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        }
    }
}

/// First line of a clap error, without the `error:` tag, plus a pointer to help.
fn usage_line(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    let first = first.strip_prefix("error: ").unwrap_or(first);
    format!("{first}; run `ropen help` for usage")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_collapse_to_one_line() {
        let err = Cli::try_parse_from(["ropen", "alias", "a", "b", "c"]).unwrap_err();
        let line = usage_line(&err);
        assert!(!line.contains('\n'));
        assert!(line.starts_with("unexpected argument 'c'"), "{line}");
        assert!(line.ends_with("run `ropen help` for usage"));

        let err = Cli::try_parse_from(["ropen", "remove"]).unwrap_err();
        assert!(!usage_line(&err).contains('\n'));
    }
}
