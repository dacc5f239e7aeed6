//! Stanza - content integrity checker and publication planner for
//! markdown blog corpora.

mod cli;
mod config;
mod content;
mod links;
mod logger;
mod pipeline;
mod report;
mod routes;
mod taxonomy;
mod utils;
mod validate;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use config::SiteConfig;
use pipeline::PipelineOutput;
use std::{fs, path::Path};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Check { check_args } => run_check(config, check_args.format),
        Commands::Plan { check_args, output } => {
            run_plan(config, check_args.format, output.as_deref())
        }
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing stanza.toml is fine: every field has a default, so a bare
/// corpus directory can be checked without any setup.
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Validate the corpus and emit the report.
fn run_check(config: &'static SiteConfig, format: OutputFormat) -> Result<()> {
    let output = pipeline::run(config)?;

    match format {
        OutputFormat::Text => output.report.emit(),
        OutputFormat::Json => println!("{}", output.report.to_json()?),
    }

    pipeline::record_manifest(&output, config)?;
    finish(&output)
}

/// Validate the corpus, then emit the route table for the renderer.
///
/// Any ERROR finding blocks the route table entirely: no partial
/// publish with silent gaps or collisions.
fn run_plan(
    config: &'static SiteConfig,
    format: OutputFormat,
    output_path: Option<&Path>,
) -> Result<()> {
    let output = pipeline::run(config)?;

    if !output.report.passed() {
        output.report.emit();
        return finish(&output);
    }

    let rendered = match format {
        OutputFormat::Text => {
            output.report.emit();
            output.routes.to_json()?
        }
        OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "report": output.report.findings(),
            "routes": serde_json::from_str::<serde_json::Value>(&output.routes.to_json()?)?,
        }))?,
    };

    match output_path {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("cannot write route table `{}`", path.display()))?;
            log!("routes"; "route table written to `{}`", path.display());
        }
        None => println!("{rendered}"),
    }

    pipeline::record_manifest(&output, config)?;
    Ok(())
}

/// Map the report outcome onto the process exit status.
fn finish(output: &PipelineOutput) -> Result<()> {
    if output.report.passed() {
        Ok(())
    } else {
        bail!(
            "validation failed with {} error(s)",
            output.report.error_count()
        )
    }
}
