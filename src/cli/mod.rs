//! Command-line interface.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Assess control effectiveness with an evaluate/reflect/reassess pipeline.
#[derive(Debug, Parser)]
#[command(name = "appraise", version, about)]
pub struct Cli {
    /// Emit machine-readable JSON instead of formatted output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a control description through the assessment pipeline
    Evaluate(commands::evaluate::EvaluateArgs),
    /// Write a default configuration file to .appraise/config.yaml
    Init(commands::init::InitArgs),
    /// Print a sample control description to try the pipeline with
    Sample,
}

/// Print a terminal error in the requested format and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{payload}");
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
