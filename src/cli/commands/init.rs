//! `appraise init` - write the default configuration file.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::Path;

use crate::domain::models::Config;

const CONFIG_DIR: &str = ".appraise";
const CONFIG_FILE: &str = ".appraise/config.yaml";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(args: InitArgs, json: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() && !args.force {
        bail!("{CONFIG_FILE} already exists; use --force to overwrite");
    }

    std::fs::create_dir_all(CONFIG_DIR)
        .with_context(|| format!("failed to create {CONFIG_DIR}"))?;

    let yaml = serde_yaml::to_string(&Config::default())
        .context("failed to serialize default configuration")?;
    std::fs::write(path, yaml).with_context(|| format!("failed to write {CONFIG_FILE}"))?;

    if json {
        println!("{}", serde_json::json!({ "created": CONFIG_FILE }));
    } else {
        println!("Wrote default configuration to {CONFIG_FILE}");
    }
    Ok(())
}
