//! Corpus configuration management for `stanza.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                       |
//! |-------------|-----------------------------------------------|
//! | `[base]`    | Corpus metadata (title, url)                  |
//! | `[content]` | Content dir, modules file, URL prefixes       |
//! | `[check]`   | Draft visibility, published-slug manifest     |
//! | `[extra]`   | User-defined custom fields                    |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Readable Code Notes"
//! url = "https://example.com"
//!
//! [content]
//! dir = "content"
//! modules_file = "modules.toml"
//!
//! [check]
//! include_drafts = false
//!
//! [extra]
//! analytics_id = "UA-12345"
//! ```

mod base;
mod check;
mod content;
pub mod defaults;
mod error;

// Re-export public types used by other modules
pub use base::BaseConfig;
pub use check::CheckConfig;
pub use content::ContentConfig;
pub use error::ConfigError;

use crate::cli::{Cli, Commands};
use anyhow::Result;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing stanza.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory (set after loading)
    #[serde(skip)]
    pub root: PathBuf,

    /// Basic corpus information
    #[serde(default)]
    pub base: BaseConfig,

    /// Content layout and URL namespaces
    #[serde(default)]
    pub content: ContentConfig,

    /// Pipeline behavior
    #[serde(default)]
    pub check: CheckConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from("./")));
        self.config_path = root.join(&cli.config);
        self.root = root;

        match &cli.command {
            Commands::Check { check_args } | Commands::Plan { check_args, .. } => {
                if check_args.drafts {
                    self.check.include_drafts = true;
                }
            }
        }
    }

    /// Validate config invariants that item-level checks rely on.
    ///
    /// Both URL prefixes must be `/`-wrapped and distinct; otherwise the
    /// planner could not keep item and module namespaces apart.
    pub fn validate(&self) -> Result<()> {
        for (name, prefix) in [
            ("content.post_prefix", &self.content.post_prefix),
            ("content.module_prefix", &self.content.module_prefix),
        ] {
            if !prefix.starts_with('/') || !prefix.ends_with('/') {
                return Err(ConfigError::Validation(format!(
                    "`{name}` must start and end with `/`, got `{prefix}`"
                ))
                .into());
            }
        }

        if self.content.post_prefix == self.content.module_prefix {
            return Err(ConfigError::Validation(format!(
                "`content.post_prefix` and `content.module_prefix` must differ, both are `{}`",
                self.content.post_prefix
            ))
            .into());
        }

        Ok(())
    }

    /// Content directory, resolved against the project root.
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.content.dir)
    }

    /// Module declaration file, resolved against the project root.
    pub fn modules_path(&self) -> PathBuf {
        self.root.join(&self.content.modules_file)
    }

    /// Published-slug manifest, resolved against the project root.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.check.manifest)
    }
}
