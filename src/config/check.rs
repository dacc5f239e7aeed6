//! `[check]` section configuration.
//!
//! Pipeline behavior toggles: draft visibility and the published-slug
//! manifest used for unpublish detection.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[check]` section in stanza.toml.
///
/// # Example
/// ```toml
/// [check]
/// include_drafts = false
/// manifest = ".stanza/manifest.json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Include draft items in the planned route table (preview mode).
    #[serde(default = "defaults::r#false")]
    pub include_drafts: bool,

    /// Published-slug manifest path, relative to the project root.
    /// Written after a passing run; read to detect unpublish events.
    #[serde(default = "defaults::check::manifest")]
    #[educe(Default = defaults::check::manifest())]
    pub manifest: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::Path;

    #[test]
    fn test_check_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert!(!config.check.include_drafts);
        assert_eq!(config.check.manifest, Path::new(".stanza/manifest.json"));
    }
}
