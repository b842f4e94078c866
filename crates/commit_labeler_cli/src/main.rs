use std::env;

use clap::Parser;
use commit_labeler_cli::{
    config::{Args, LabelerConfig},
    runner,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter.
const LOG_ENV_VAR: &str = "COMMIT_LABELER_LOG";

fn init_logging() {
    // GitHub sets RUNNER_DEBUG when step debug logging is enabled for a run
    let default_level = if env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1") {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    let args = Args::parse();
    let result = match LabelerConfig::from_args(args) {
        Ok(config) => runner::execute(&config).await,
        Err(e) => Err(e),
    };

    let code = match result {
        Ok(outcome) => runner::report(&outcome),
        Err(e) => runner::report_error(&e),
    };
    std::process::exit(code);
}
