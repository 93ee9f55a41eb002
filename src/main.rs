//! pod - Main entry point

use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use podctl::{run_command, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting pod v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: command={}, pod={:?}, cache_file={}, interval={}, timeout={}, batch={}",
        cli.command.name(),
        cli.pod,
        cli.cache_file.display(),
        cli.interval,
        cli.timeout,
        cli.batch
    );

    match run_command(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
