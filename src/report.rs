//! Validation report: findings collected across all pipeline stages.
//!
//! Every stage appends findings into a single [`Report`]; nothing aborts
//! on the first problem. The report is sealed once at the end of the run
//! by sorting on `(slug, kind, detail)`, so its ordering never depends on
//! worker scheduling.
//!
//! Severity rules:
//! - `Error` findings block publication of the whole corpus.
//! - `Warning` findings (e.g. an unpublish event) are notable but pass.

use crate::log;
use serde::Serialize;
use std::fmt;

// ============================================================================
// Severity
// ============================================================================

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

// ============================================================================
// Finding Kinds
// ============================================================================

/// The full taxonomy of corpus problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    /// Front matter missing, unterminated, or carrying invalid values
    MalformedFrontMatter,
    /// Item names a module key with no declaration
    UnknownModuleReference,
    /// Module lists a member slug with no matching item
    OrphanedModuleMember,
    /// Module and item both exist but the membership link is one-sided
    ModuleMembershipMismatch,
    /// Body links to a slug that does not exist
    DanglingReference,
    /// Two items share one slug
    DuplicateSlug,
    /// Published item has no date
    MissingPublishDate,
    /// Tag is not lowercase kebab-case
    MalformedTag,
    /// Two entities map to the same URL path
    DuplicateRoute,
    /// Item was published in the previous run and is now a draft
    UnpublishedItem,
}

impl FindingKind {
    /// Severity is a property of the kind, not the occurrence.
    pub const fn severity(self) -> Severity {
        match self {
            Self::UnpublishedItem => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Short name used in text reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MalformedFrontMatter => "malformed-front-matter",
            Self::UnknownModuleReference => "unknown-module-reference",
            Self::OrphanedModuleMember => "orphaned-module-member",
            Self::ModuleMembershipMismatch => "module-membership-mismatch",
            Self::DanglingReference => "dangling-reference",
            Self::DuplicateSlug => "duplicate-slug",
            Self::MissingPublishDate => "missing-publish-date",
            Self::MalformedTag => "malformed-tag",
            Self::DuplicateRoute => "duplicate-route",
            Self::UnpublishedItem => "unpublished-item",
        }
    }
}

// ============================================================================
// Finding
// ============================================================================

/// One problem, attached to the offending entity's identity.
///
/// `slug` is the content item slug, module key, or route path the
/// finding is about; `detail` is the human-readable specifics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub kind: FindingKind,
    pub slug: String,
    pub detail: String,
}

impl Finding {
    pub fn new(kind: FindingKind, slug: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            slug: slug.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity.name(),
            self.kind.name(),
            self.slug,
            self.detail
        )
    }
}

// ============================================================================
// Report
// ============================================================================

/// The merged validation-result collection.
///
/// Built via append-then-sort: stages push findings in whatever order
/// their workers finish, and [`Report::seal`] makes the order
/// deterministic before anything is emitted.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    findings: Vec<Finding>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// Sort findings by (slug, kind, detail) for deterministic output.
    pub fn seal(&mut self) {
        self.findings
            .sort_by(|a, b| (&a.slug, a.kind, &a.detail).cmp(&(&b.slug, b.kind, &b.detail)));
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    /// Overall success: zero ERROR-severity findings. Warnings pass.
    pub fn passed(&self) -> bool {
        self.error_count() == 0
    }

    /// Pretty JSON for machine consumption.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.findings)
    }

    /// Emit the report through the logger, one line per finding.
    pub fn emit(&self) {
        for finding in &self.findings {
            match finding.severity {
                Severity::Error => log!("error"; "{finding}"),
                Severity::Warning => log!("warn"; "{finding}"),
            }
        }
        log!(
            "report";
            "{} finding(s): {} error(s), {} warning(s)",
            self.findings.len(),
            self.error_count(),
            self.warning_count()
        );
    }
}
