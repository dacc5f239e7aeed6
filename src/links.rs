//! Internal cross-reference resolution.
//!
//! Scans every item body for markdown links targeting another item's
//! canonical path (`[text](/posts/{slug}/)`) and resolves each target
//! against the full slug set. Broken links are collected one finding
//! per link; a single bad reference never aborts the run, so one run
//! reports every problem.
//!
//! Bodies are otherwise opaque: nothing else in the pipeline interprets
//! their content.

use crate::content::ContentItem;
use crate::report::{Finding, FindingKind, Report};
use rayon::prelude::*;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Markdown link whose target is an internal post path.
///
/// Matches `](/posts/<slug>)` and `](/posts/<slug>/)`, with an optional
/// `#fragment` after the slug. The capture is the slug alone.
static INTERNAL_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\]\(/posts/([^/)#\s]+)/?(?:#[^)]*)?\)").unwrap()
});

/// Extract the internal link targets of one body, in document order.
pub fn extract_targets(body: &str) -> Vec<&str> {
    INTERNAL_LINK
        .captures_iter(body)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Resolve every cross-link in the corpus.
///
/// Returns the total number of internal links seen. Dangling targets
/// are appended to the report as `DanglingReference` findings.
pub fn resolve_links(items: &[ContentItem], report: &mut Report) -> usize {
    let slugs: BTreeSet<&str> = items.iter().map(|i| i.slug.as_str()).collect();

    let per_item: Vec<(usize, Vec<Finding>)> = items
        .par_iter()
        .map(|item| {
            let targets = extract_targets(&item.body);
            let findings = targets
                .iter()
                .filter(|target| !slugs.contains(**target))
                .map(|target| {
                    Finding::new(
                        FindingKind::DanglingReference,
                        item.slug.clone(),
                        format!("links to unknown slug `{target}`"),
                    )
                })
                .collect();
            (targets.len(), findings)
        })
        .collect();

    let mut total = 0;
    for (count, findings) in per_item {
        total += count;
        report.extend(findings);
    }
    total
}
