//! `[content]` section configuration.
//!
//! Where the corpus lives and which URL namespaces its entities occupy.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section in stanza.toml.
///
/// # Example
/// ```toml
/// [content]
/// dir = "content"
/// modules_file = "modules.toml"
/// post_prefix = "/posts/"
/// module_prefix = "/modules/"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Content directory, relative to the project root.
    #[serde(default = "defaults::content::dir")]
    #[educe(Default = defaults::content::dir())]
    pub dir: PathBuf,

    /// Module declaration file, relative to the project root.
    #[serde(default = "defaults::content::modules_file")]
    #[educe(Default = defaults::content::modules_file())]
    pub modules_file: PathBuf,

    /// URL prefix for content item pages.
    #[serde(default = "defaults::content::post_prefix")]
    #[educe(Default = defaults::content::post_prefix())]
    pub post_prefix: String,

    /// URL prefix for module index pages.
    #[serde(default = "defaults::content::module_prefix")]
    #[educe(Default = defaults::content::module_prefix())]
    pub module_prefix: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::Path;

    #[test]
    fn test_content_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.content.dir, Path::new("content"));
        assert_eq!(config.content.post_prefix, "/posts/");
        assert_eq!(config.content.module_prefix, "/modules/");
    }

    #[test]
    fn test_content_overrides() {
        let config: SiteConfig = toml::from_str(
            r#"
            [content]
            dir = "corpus"
            post_prefix = "/writing/"
        "#,
        )
        .unwrap();
        assert_eq!(config.content.dir, Path::new("corpus"));
        assert_eq!(config.content.post_prefix, "/writing/");
        // Untouched fields keep defaults
        assert_eq!(config.content.module_prefix, "/modules/");
    }
}
