//! Corpus-wide integrity invariants.
//!
//! Everything here spans multiple items, which is why it runs after
//! parsing instead of inside it:
//!
//! - global slug uniqueness (`DuplicateSlug`)
//! - published items must carry a date (`MissingPublishDate`)
//! - tags must be lowercase kebab-case (`MalformedTag`)
//! - visibility transitions: forward `DRAFT → PUBLISHED` is silent;
//!   `PUBLISHED → DRAFT` is legal but notable, reported as a WARNING
//!   `UnpublishedItem` because it changes what the planner emits.
//!
//! The unpublish check compares against the previous run's published
//! slug manifest; without one, first runs report nothing.
//!
//! Returns the set of slugs barred from publication: duplicated slugs
//! and dateless published items never reach the route table.

use crate::content::ContentItem;
use crate::report::{Finding, FindingKind, Report};
use crate::utils::slug;
use std::collections::{BTreeMap, BTreeSet};

/// Run all corpus-wide checks, appending findings.
///
/// `previously_published` is the published slug set from the last
/// successful run, if a manifest exists.
pub fn validate(
    items: &[ContentItem],
    previously_published: Option<&BTreeSet<String>>,
    report: &mut Report,
) -> BTreeSet<String> {
    let mut barred = BTreeSet::new();

    // Global slug uniqueness: one finding per duplicated slug, naming
    // every conflicting path.
    let mut by_slug: BTreeMap<&str, Vec<&ContentItem>> = BTreeMap::new();
    for item in items {
        by_slug.entry(item.slug.as_str()).or_default().push(item);
    }
    for (item_slug, owners) in &by_slug {
        if owners.len() > 1 {
            let paths: Vec<String> = owners
                .iter()
                .map(|i| i.source.display().to_string())
                .collect();
            report.push(Finding::new(
                FindingKind::DuplicateSlug,
                *item_slug,
                format!("claimed by {} files: {}", owners.len(), paths.join(", ")),
            ));
            barred.insert((*item_slug).to_owned());
        }
    }

    for item in items {
        // Published items need a date; drafts do not.
        if item.is_published() && item.date.is_none() {
            report.push(Finding::new(
                FindingKind::MissingPublishDate,
                item.slug.clone(),
                format!("published item `{}` has no date", item.source.display()),
            ));
            barred.insert(item.slug.clone());
        }

        // Tag normalization policy.
        for tag in &item.tags {
            if !slug::is_canonical(tag) {
                report.push(Finding::new(
                    FindingKind::MalformedTag,
                    item.slug.clone(),
                    format!("tag `{tag}` is not lowercase kebab-case"),
                ));
            }
        }

        // Unpublish event: was in the last published set, now a draft.
        if item.is_draft()
            && previously_published.is_some_and(|prev| prev.contains(&item.slug))
        {
            report.push(Finding::new(
                FindingKind::UnpublishedItem,
                item.slug.clone(),
                "was published in the previous run and is now a draft".to_owned(),
            ));
        }
    }

    barred
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::item::fixtures::{draft, item};
    use crate::report::Severity;
    use std::path::PathBuf;

    #[test]
    fn test_clean_corpus_passes() {
        let items = vec![item("post-a"), item("post-b"), draft("wip")];
        let mut report = Report::new();
        let barred = validate(&items, None, &mut report);
        assert!(report.findings().is_empty());
        assert!(barred.is_empty());
    }

    #[test]
    fn test_duplicate_slug_single_finding() {
        let mut first = item("the-damp-principle");
        first.source = PathBuf::from("readability/damp.md");
        let mut second = item("the-damp-principle");
        second.source = PathBuf::from("old/damp.md");

        let mut report = Report::new();
        let barred = validate(&[first, second], None, &mut report);

        assert_eq!(report.findings().len(), 1);
        let finding = &report.findings()[0];
        assert_eq!(finding.kind, FindingKind::DuplicateSlug);
        assert_eq!(finding.slug, "the-damp-principle");
        assert!(finding.detail.contains("readability/damp.md"));
        assert!(finding.detail.contains("old/damp.md"));
        assert!(barred.contains("the-damp-principle"));
    }

    #[test]
    fn test_published_without_date_barred() {
        let mut undated = item("post-a");
        undated.date = None;

        let mut report = Report::new();
        let barred = validate(&[undated], None, &mut report);

        assert_eq!(report.findings().len(), 1);
        assert_eq!(report.findings()[0].kind, FindingKind::MissingPublishDate);
        assert!(barred.contains("post-a"));
    }

    #[test]
    fn test_draft_without_date_permitted() {
        let mut report = Report::new();
        let barred = validate(&[draft("wip")], None, &mut report);
        assert!(report.findings().is_empty());
        assert!(barred.is_empty());
    }

    #[test]
    fn test_malformed_tags_one_finding_each() {
        let mut tagged = item("post-a");
        tagged.tags = vec!["ok-tag".into(), "Bad Tag".into(), "UPPER".into()];

        let mut report = Report::new();
        let barred = validate(&[tagged], None, &mut report);

        assert_eq!(report.findings().len(), 2);
        assert!(
            report
                .findings()
                .iter()
                .all(|f| f.kind == FindingKind::MalformedTag)
        );
        // Tag problems do not bar publication
        assert!(barred.is_empty());
    }

    #[test]
    fn test_unpublish_is_warning_not_error() {
        let previous: BTreeSet<String> = ["post-a".to_owned()].into();
        let mut report = Report::new();
        validate(&[draft("post-a")], Some(&previous), &mut report);

        assert_eq!(report.findings().len(), 1);
        let finding = &report.findings()[0];
        assert_eq!(finding.kind, FindingKind::UnpublishedItem);
        assert_eq!(finding.severity, Severity::Warning);
        assert!(report.passed());
    }

    #[test]
    fn test_new_draft_is_not_an_unpublish() {
        let previous: BTreeSet<String> = ["post-a".to_owned()].into();
        let mut report = Report::new();
        validate(&[item("post-a"), draft("wip")], Some(&previous), &mut report);
        assert!(report.findings().is_empty());
    }
}
