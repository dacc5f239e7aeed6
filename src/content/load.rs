//! Corpus enumeration and parallel parsing.
//!
//! Walks the content dir for `*.md` units, reads and parses each one on
//! rayon workers, and merges the results sorted by slug so the outcome
//! never depends on worker scheduling.
//!
//! Error split:
//! - An unreadable corpus root or content unit is fatal ([`CorpusError`])
//!   and aborts before any item-level validation.
//! - A unit that reads fine but fails to parse becomes a
//!   `MalformedFrontMatter` finding and the run continues.

use crate::content::frontmatter;
use crate::content::item::ContentItem;
use crate::report::{Finding, FindingKind};
use crate::utils::slug;
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

/// Fatal corpus-level I/O failures.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("cannot read content directory `{0}`")]
    Unreadable(PathBuf, #[source] std::io::Error),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Everything the parser stage produces.
#[derive(Debug, Default)]
pub struct LoadedCorpus {
    /// Parsed items, sorted by (slug, source path)
    pub items: Vec<ContentItem>,
    /// Parse failures, one per malformed unit
    pub findings: Vec<Finding>,
}

/// Collect all `*.md` files under the content dir, sorted by path.
pub fn collect_content_files(dir: &Path) -> Result<Vec<PathBuf>, CorpusError> {
    if !dir.is_dir() {
        return Err(CorpusError::Unreadable(
            dir.to_path_buf(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| CorpusError::Unreadable(dir.to_path_buf(), e.into()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "md")
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Read and parse every content unit under `content_dir`.
pub fn load_corpus(content_dir: &Path) -> Result<LoadedCorpus, CorpusError> {
    let files = collect_content_files(content_dir)?;

    let outcomes: Vec<Result<ContentItem, Finding>> = files
        .par_iter()
        .map(|path| {
            let raw =
                fs::read_to_string(path).map_err(|e| CorpusError::Io(path.clone(), e))?;
            let relative = path.strip_prefix(content_dir).unwrap_or(path);

            Ok(match frontmatter::parse_item(relative, &raw) {
                Ok(item) => Ok(item),
                Err(e) => Err(Finding::new(
                    FindingKind::MalformedFrontMatter,
                    slug::slug_from_path(relative),
                    format!("{}: {e}", relative.display()),
                )),
            })
        })
        .collect::<Result<_, CorpusError>>()?;

    let mut corpus = LoadedCorpus::default();
    for outcome in outcomes {
        match outcome {
            Ok(item) => corpus.items.push(item),
            Err(finding) => corpus.findings.push(finding),
        }
    }
    corpus
        .items
        .sort_by(|a, b| (&a.slug, &a.source).cmp(&(&b.slug, &b.source)));

    Ok(corpus)
}
