//! Content item model.
//!
//! A [`ContentItem`] is one authored post or page: the parsed front
//! matter plus the raw body. The pipeline only reads these; authored
//! content is never mutated.

use crate::utils::date::DateTimeUtc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Visibility state controlling route-table inclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DraftState {
    Draft,
    Published,
}

/// One authored post/page unit.
#[derive(Debug, Clone)]
pub struct ContentItem {
    /// Unique path-identifying string, derived from the file path
    /// unless overridden in front matter
    pub slug: String,
    /// Non-empty display title
    pub title: String,
    /// Publication date; required for published items, optional for drafts
    pub date: Option<DateTimeUtc>,
    /// Tags carried by this item; order irrelevant, may be empty
    pub tags: Vec<String>,
    /// Optional module (category) key
    pub module: Option<String>,
    pub state: DraftState,
    /// Raw body text; opaque to everything except the link resolver
    pub body: String,
    /// Path relative to the content dir, for reporting identity
    pub source: PathBuf,
    /// Unknown front-matter fields, preserved but not validated
    #[allow(dead_code)] // Carried for forward compatibility
    pub extra: BTreeMap<String, toml::Value>,
}

impl ContentItem {
    pub const fn is_draft(&self) -> bool {
        matches!(self.state, DraftState::Draft)
    }

    pub const fn is_published(&self) -> bool {
        matches!(self.state, DraftState::Published)
    }
}
