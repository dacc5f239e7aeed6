//! Front matter parsing.
//!
//! A content unit is a markdown file opening with a TOML front matter
//! block fenced by `+++` lines:
//!
//! ```text
//! +++
//! title = "The DAMP Principle"
//! date = "2024-03-15"
//! tags = ["readability"]
//! module = "readability-flow"
//! +++
//!
//! Body text...
//! ```
//!
//! Recognized keys: `title` (required), `date`, `tags`, `module` (alias
//! `categories`), `slug` (identity override), `draft` (default false).
//! Unknown keys are preserved in [`ContentItem::extra`] and never
//! validated, so authored front matter can grow fields the pipeline does
//! not know about yet.
//!
//! Parsing is a pure transform: raw text in, [`ContentItem`] or
//! [`FrontMatterError`] out.

use crate::content::item::{ContentItem, DraftState};
use crate::utils::{date::DateTimeUtc, slug};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Front matter fence line.
const FENCE: &str = "+++";

/// Why a content unit failed to parse.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("missing `+++` front matter block")]
    MissingBlock,

    #[error("unterminated front matter: no closing `+++`")]
    Unterminated,

    #[error("front matter parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("unparseable date `{0}` (expected YYYY-MM-DD or RFC3339 Z)")]
    BadDate(String),
}

/// Raw front matter shape, before semantic checks.
#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, alias = "categories")]
    module: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    draft: bool,
    #[serde(flatten)]
    extra: BTreeMap<String, toml::Value>,
}

/// Split a raw content unit into (front matter TOML, body).
fn split_unit(raw: &str) -> Result<(&str, &str), FrontMatterError> {
    let rest = raw
        .strip_prefix(FENCE)
        .and_then(|r| r.strip_prefix('\n').or_else(|| r.strip_prefix("\r\n")))
        .ok_or(FrontMatterError::MissingBlock)?;

    // Closing fence must sit on its own line.
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let meta = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((meta, body));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

/// Parse one content unit into a [`ContentItem`].
///
/// `relative` is the unit's path relative to the content dir; it
/// supplies the default slug and the reporting identity.
pub fn parse_item(relative: &Path, raw: &str) -> Result<ContentItem, FrontMatterError> {
    let (meta, body) = split_unit(raw)?;
    let fm: FrontMatter = toml::from_str(meta)?;

    if fm.title.trim().is_empty() {
        return Err(FrontMatterError::EmptyTitle);
    }

    let date = match &fm.date {
        Some(raw_date) => Some(
            DateTimeUtc::parse(raw_date)
                .ok_or_else(|| FrontMatterError::BadDate(raw_date.clone()))?,
        ),
        None => None,
    };

    // Explicit front-matter slug wins; the path is the fallback.
    let item_slug = match fm.slug {
        Some(s) => s,
        None => slug::slug_from_path(relative),
    };

    Ok(ContentItem {
        slug: item_slug,
        title: fm.title,
        date,
        tags: fm.tags,
        module: fm.module,
        state: if fm.draft {
            DraftState::Draft
        } else {
            DraftState::Published
        },
        body: body.to_owned(),
        source: relative.to_path_buf(),
        extra: fm.extra,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: &str = "\
+++
title = \"The DAMP Principle\"
date = \"2024-03-15\"
tags = [\"readability\", \"naming\"]
module = \"readability-flow\"
+++

Descriptive And Meaningful Phrases.
";

    #[test]
    fn test_parse_full_unit() {
        let item = parse_item(Path::new("readability/damp.md"), UNIT).unwrap();
        assert_eq!(item.slug, "damp");
        assert_eq!(item.title, "The DAMP Principle");
        assert_eq!(item.date.unwrap().to_ymd(), "2024-03-15");
        assert_eq!(item.tags, ["readability", "naming"]);
        assert_eq!(item.module.as_deref(), Some("readability-flow"));
        assert!(item.is_published());
        assert!(item.body.contains("Descriptive And Meaningful"));
    }

    #[test]
    fn test_slug_override_beats_path() {
        let raw = "+++\ntitle = \"x\"\nslug = \"the-damp-principle\"\ndraft = true\n+++\n";
        let item = parse_item(Path::new("old/damp-v2.md"), raw).unwrap();
        assert_eq!(item.slug, "the-damp-principle");
        assert!(item.is_draft());
    }

    #[test]
    fn test_draft_without_date_is_fine() {
        let raw = "+++\ntitle = \"wip\"\ndraft = true\n+++\nbody\n";
        let item = parse_item(Path::new("wip.md"), raw).unwrap();
        assert!(item.date.is_none());
        assert!(item.is_draft());
    }

    #[test]
    fn test_categories_alias() {
        let raw = "+++\ntitle = \"x\"\ncategories = \"readability-flow\"\n+++\n";
        let item = parse_item(Path::new("x.md"), raw).unwrap();
        assert_eq!(item.module.as_deref(), Some("readability-flow"));
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let raw = "+++\ntitle = \"x\"\nseries = \"rewrites\"\nweight = 3\n+++\n";
        let item = parse_item(Path::new("x.md"), raw).unwrap();
        assert_eq!(
            item.extra.get("series").and_then(|v| v.as_str()),
            Some("rewrites")
        );
        assert_eq!(item.extra.get("weight").and_then(|v| v.as_integer()), Some(3));
    }

    #[test]
    fn test_missing_block() {
        let err = parse_item(Path::new("x.md"), "no fences here").unwrap_err();
        assert!(matches!(err, FrontMatterError::MissingBlock));
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse_item(Path::new("x.md"), "+++\ntitle = \"x\"\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated));
    }

    #[test]
    fn test_missing_title_is_toml_error() {
        let err = parse_item(Path::new("x.md"), "+++\ndate = \"2024-01-01\"\n+++\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Toml(_)));
    }

    #[test]
    fn test_empty_title_rejected() {
        let err = parse_item(Path::new("x.md"), "+++\ntitle = \"  \"\n+++\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::EmptyTitle));
    }

    #[test]
    fn test_bad_date_rejected() {
        let raw = "+++\ntitle = \"x\"\ndate = \"last tuesday\"\n+++\n";
        let err = parse_item(Path::new("x.md"), raw).unwrap_err();
        assert!(matches!(err, FrontMatterError::BadDate(_)));
    }

    #[test]
    fn test_crlf_fences() {
        let raw = "+++\r\ntitle = \"x\"\r\n+++\r\nbody\r\n";
        let item = parse_item(Path::new("x.md"), raw).unwrap();
        assert_eq!(item.title, "x");
    }
}
