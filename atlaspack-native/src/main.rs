mod cli;
mod config;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // also picks up `log` records from the library
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let err_exit = ExitCode::from(1);
    let ok_exit = ExitCode::from(0);

    match cli::cli() {
        cli::CliRes::NoCli => {
            cli::help();
            err_exit
        }
        cli::CliRes::Ok => ok_exit,
        cli::CliRes::Err => err_exit,
    }
}
