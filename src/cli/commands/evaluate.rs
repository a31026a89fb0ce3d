//! `appraise evaluate` - run one assessment.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::output;
use crate::domain::models::{AssessmentInput, AssessmentStatus};
use crate::domain::ports::ModelParams;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::openai::{OpenAiClient, OpenAiClientConfig};
use crate::services::AssessmentEngine;

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Control description to evaluate
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File containing the control description (JSON files are passed as
    /// structured input)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Load configuration from this file instead of .appraise/
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub async fn execute(args: EvaluateArgs, json: bool) -> Result<()> {
    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let input = resolve_input(&args)?;

    let client_config = OpenAiClientConfig::from_config(&config.completion)?;
    let client = Arc::new(OpenAiClient::new(client_config)?);
    let engine = AssessmentEngine::new(client, ModelParams::from(&config.completion));

    let spinner = (!json).then(|| {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message("Analyzing control effectiveness...");
        bar.enable_steady_tick(Duration::from_millis(120));
        bar
    });

    let report = engine.run(input).await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::render_report(&report);
    }

    if report.status == AssessmentStatus::Error {
        let message = report
            .error
            .as_available()
            .cloned()
            .unwrap_or_else(|| "assessment failed".to_string());
        bail!("{message}");
    }
    Ok(())
}

/// Resolve the assessment input from the command arguments.
fn resolve_input(args: &EvaluateArgs) -> Result<AssessmentInput> {
    match (&args.text, &args.file) {
        (Some(text), None) => Ok(AssessmentInput::Text(text.clone())),
        (None, Some(path)) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            // JSON files become structured input; anything else is treated
            // as a plain-text control description.
            match serde_json::from_str(&contents) {
                Ok(value) => Ok(AssessmentInput::Structured(value)),
                Err(_) => Ok(AssessmentInput::Text(contents)),
            }
        }
        (None, None) => bail!("provide a control description with --text or --file"),
        (Some(_), Some(_)) => unreachable!("clap rejects --text with --file"),
    }
}
