//! `[base]` section configuration.
//!
//! Basic corpus information: title and canonical URL.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in stanza.toml - basic corpus metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Blog"
/// url = "https://example.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Corpus title, passed through to the rendering collaborator.
    #[serde(default)]
    pub title: String,

    /// Canonical base URL for the published site.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,
}
