//! Appraise CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use appraise::cli::{Cli, Commands};
use appraise::{Config, ConfigLoader, LoggingConfig};

/// Install the global subscriber per the logging configuration; `RUST_LOG`
/// overrides the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));
    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    // Config problems are reported later, once the CLI error handler knows
    // the requested output format.
    let config = ConfigLoader::load().unwrap_or_else(|_| Config::default());
    init_tracing(&config.logging);

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate(args) => appraise::cli::commands::evaluate::execute(args, cli.json).await,
        Commands::Init(args) => appraise::cli::commands::init::execute(args, cli.json).await,
        Commands::Sample => appraise::cli::commands::sample::execute(cli.json).await,
    };

    if let Err(err) = result {
        appraise::cli::handle_error(err, cli.json);
    }
}
