//! Command-line companion for statehooks.
//!
//! ```bash
//! statehooks validate fields.json
//! statehooks breakpoint 1024
//! statehooks breakpoint 1024 --resize 700 --resize 1300
//! statehooks --config hooks.toml breakpoint 1024
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use statehooks::config::Config;
use statehooks::form::{FieldDefinition, FormArgs, UseForm};
use statehooks::logging::init_tracing;

#[derive(Parser)]
#[command(name = "statehooks")]
#[command(about = "Inspect form definitions and breakpoints", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML config file (defaults are used if missing)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON map of field definitions and print the resulting state
    Validate {
        /// JSON file: {"field": {"value": ..., "error": false, "errorMessage": "..."}}
        #[arg(value_name = "FIELDS_JSON")]
        fields: PathBuf,
    },

    /// Print the breakpoint active at a viewport width
    Breakpoint {
        #[arg(value_name = "WIDTH")]
        width: u32,

        /// Widths to resize to afterwards, in order (ignored unless
        /// `responsive.listen_resize` is on)
        #[arg(long = "resize", value_name = "WIDTH")]
        resizes: Vec<u32>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Validate { fields } => validate(&config, &fields),
        Commands::Breakpoint { width, resizes } => breakpoint(&config, width, &resizes),
    }
}

fn validate(config: &Config, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let fields: BTreeMap<String, FieldDefinition> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a field definition map", path.display()))?;

    let form = UseForm::new(FormArgs::from_fields(fields).options(config.form.options()))
        .context("failed to create form")?;
    let valid = form.is_valid_form();

    let output = json!({ "valid": valid, "state": form.state() });
    println!("{}", serde_json::to_string_pretty(&output)?);

    if !valid {
        std::process::exit(1);
    }
    Ok(())
}

fn breakpoint(config: &Config, width: u32, resizes: &[u32]) -> Result<()> {
    let mut responsive = config.responsive.tracker(width)?;
    let changes = resizes
        .iter()
        .filter(|&&next| responsive.handle_resize(next))
        .count();

    let output = json!({
        "width": responsive.width(),
        "changes": changes,
        "breakpoint": responsive.breakpoint(),
        "screen": responsive.screen(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
