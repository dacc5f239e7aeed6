//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Stanza content integrity checker CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: stanza.toml)
    #[arg(short = 'C', long, default_value = "stanza.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Report output format
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal lines
    #[default]
    Text,
    /// JSON records for machine consumption
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

/// Shared arguments for Check and Plan commands
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Include draft items in the planned route table (preview mode)
    #[arg(long)]
    pub drafts: bool,

    /// Output format for the validation report
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate the corpus and print the report
    Check {
        #[command(flatten)]
        check_args: CheckArgs,
    },

    /// Validate the corpus, then emit the route table for the renderer
    Plan {
        #[command(flatten)]
        check_args: CheckArgs,

        /// Write the route table to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_check(&self) -> bool {
        matches!(self.command, Commands::Check { .. })
    }
    pub const fn is_plan(&self) -> bool {
        matches!(self.command, Commands::Plan { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_with_drafts() {
        let cli = Cli::try_parse_from(["stanza", "check", "--drafts", "--format", "json"]).unwrap();
        assert!(cli.is_check());
        let Commands::Check { check_args } = &cli.command else {
            panic!("expected check");
        };
        assert!(check_args.drafts);
        assert_eq!(check_args.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_plan_with_output() {
        let cli = Cli::try_parse_from(["stanza", "plan", "-o", "routes.json"]).unwrap();
        assert!(cli.is_plan());
        let Commands::Plan { check_args, output } = &cli.command else {
            panic!("expected plan");
        };
        assert!(!check_args.drafts);
        assert_eq!(output.as_deref(), Some(std::path::Path::new("routes.json")));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["stanza", "check"]).unwrap();
        assert!(cli.root.is_none());
        assert_eq!(cli.config, PathBuf::from("stanza.toml"));
    }
}
