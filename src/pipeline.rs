//! Pipeline orchestration.
//!
//! Runs the five stages over one immutable snapshot of the corpus:
//!
//! ```text
//! run()
//!     │
//!     ├── ModuleSet::from_path()     authored module declarations
//!     ├── load_corpus()              parse units in parallel
//!     ├── taxonomy::build()          module↔item + tag index
//!     ├── links::resolve_links()     cross-reference resolution
//!     ├── validate::validate()       corpus-wide invariants
//!     └── routes::plan()             final route table
//! ```
//!
//! Item-level problems accumulate in the report; only an unreadable
//! corpus root, config, or module file aborts. The run is stateless and
//! idempotent: an unchanged corpus yields an identical report and route
//! table.

use crate::config::SiteConfig;
use crate::content::{ModuleSet, load_corpus};
use crate::report::Report;
use crate::routes::{Manifest, RouteTable};
use crate::{links, log, routes, taxonomy, validate};
use anyhow::Result;

/// Everything one pipeline run produces.
#[derive(Debug)]
pub struct PipelineOutput {
    pub report: Report,
    pub routes: RouteTable,
}

/// Run the full pipeline for the configured corpus.
pub fn run(config: &SiteConfig) -> Result<PipelineOutput> {
    let modules = ModuleSet::from_path(&config.modules_path())?;
    let corpus = load_corpus(&config.content_dir())?;
    log!(
        "corpus";
        "found {} content unit(s), {} module declaration(s)",
        corpus.items.len() + corpus.findings.len(),
        modules.modules.len()
    );

    let mut report = Report::new();
    report.extend(corpus.findings);

    let taxonomy = taxonomy::build(&corpus.items, &modules, &mut report);
    log!("taxonomy"; "{} tag(s) indexed", taxonomy.tags.len());

    let link_count = links::resolve_links(&corpus.items, &mut report);
    log!("links"; "{link_count} internal link(s) resolved");

    let previous = Manifest::load(&config.manifest_path()).map(|m| m.published_set());
    let barred = validate::validate(&corpus.items, previous.as_ref(), &mut report);

    let routes = routes::plan(&corpus.items, &taxonomy, &barred, config, &mut report);
    log!("routes"; "{} route(s) planned", routes.len());

    report.seal();
    Ok(PipelineOutput { report, routes })
}

/// Persist the published-slug manifest after a passing run.
///
/// Preview runs (include_drafts) never write it: a draft shown in
/// preview was not published.
pub fn record_manifest(output: &PipelineOutput, config: &SiteConfig) -> Result<()> {
    if output.report.passed() && !config.check.include_drafts {
        Manifest::from_routes(&output.routes).write(&config.manifest_path())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FindingKind;
    use crate::routes::RouteTarget;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config_for(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = root.to_path_buf();
        config
    }

    /// A small consistent corpus: two published posts in one module,
    /// one draft, cross-linked.
    fn seed_corpus(root: &Path) {
        write_file(
            root,
            "content/readability/the-damp-principle.md",
            "+++\ntitle = \"The DAMP Principle\"\ndate = \"2024-03-15\"\n\
             tags = [\"readability\"]\nmodule = \"readability-flow\"\n+++\n\
             See [rhythm](/posts/paragraph-rhythm/).\n",
        );
        write_file(
            root,
            "content/readability/paragraph-rhythm.md",
            "+++\ntitle = \"Paragraph Rhythm\"\ndate = \"2024-04-01\"\n\
             module = \"readability-flow\"\n+++\nBody.\n",
        );
        write_file(
            root,
            "content/wip/drafting.md",
            "+++\ntitle = \"Drafting\"\ndraft = true\n+++\nNot ready.\n",
        );
        write_file(
            root,
            "modules.toml",
            "[[module]]\nkey = \"readability-flow\"\ntitle = \"Readability & Flow\"\n\
             members = [\"the-damp-principle\", \"paragraph-rhythm\"]\n",
        );
    }

    #[test]
    fn test_clean_corpus_passes_and_routes() {
        let dir = TempDir::new().unwrap();
        seed_corpus(dir.path());
        let config = config_for(dir.path());

        let output = run(&config).unwrap();
        assert!(output.report.passed());
        assert_eq!(output.routes.len(), 3); // 2 posts + 1 module index
        assert!(output.routes.get("/posts/drafting/").is_none());
        assert!(matches!(
            output.routes.get("/modules/readability-flow/"),
            Some(RouteTarget::ModuleIndex { .. })
        ));
    }

    #[test]
    fn test_drafts_mode_includes_draft_route() {
        let dir = TempDir::new().unwrap();
        seed_corpus(dir.path());
        let mut config = config_for(dir.path());
        config.check.include_drafts = true;

        let output = run(&config).unwrap();
        assert!(output.routes.get("/posts/drafting/").is_some());
    }

    #[test]
    fn test_idempotent_runs() {
        let dir = TempDir::new().unwrap();
        seed_corpus(dir.path());
        // Make the corpus dirty so the report is non-trivial.
        write_file(
            dir.path(),
            "content/broken.md",
            "+++\ntitle = \"Broken\"\ndate = \"not a date\"\n+++\n",
        );
        let config = config_for(dir.path());

        let first = run(&config).unwrap();
        let second = run(&config).unwrap();
        assert_eq!(first.report.findings(), second.report.findings());
        assert_eq!(
            first.routes.to_json().unwrap(),
            second.routes.to_json().unwrap()
        );
    }

    #[test]
    fn test_duplicate_slug_scenario() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "content/a.md",
            "+++\ntitle = \"A\"\ndate = \"2024-01-01\"\nslug = \"the-damp-principle\"\n+++\n",
        );
        write_file(
            dir.path(),
            "content/b.md",
            "+++\ntitle = \"B\"\ndate = \"2024-01-02\"\nslug = \"the-damp-principle\"\n+++\n",
        );
        let config = config_for(dir.path());

        let output = run(&config).unwrap();
        let dupes: Vec<_> = output
            .report
            .findings()
            .iter()
            .filter(|f| f.kind == FindingKind::DuplicateSlug)
            .collect();
        assert_eq!(dupes.len(), 1);
        assert!(output.routes.get("/posts/the-damp-principle/").is_none());
        assert!(!output.report.passed());
    }

    #[test]
    fn test_orphaned_member_scenario() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "content/post-a.md",
            "+++\ntitle = \"A\"\ndate = \"2024-01-01\"\nmodule = \"m\"\n+++\n",
        );
        write_file(
            dir.path(),
            "modules.toml",
            "[[module]]\nkey = \"m\"\ntitle = \"M\"\nmembers = [\"post-a\", \"post-b\"]\n",
        );
        let config = config_for(dir.path());

        let output = run(&config).unwrap();
        let orphans: Vec<_> = output
            .report
            .findings()
            .iter()
            .filter(|f| f.kind == FindingKind::OrphanedModuleMember)
            .collect();
        assert_eq!(orphans.len(), 1);
        assert!(orphans[0].detail.contains("post-b"));
    }

    #[test]
    fn test_missing_date_excluded_from_routes() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "content/undated.md", "+++\ntitle = \"U\"\n+++\n");
        let config = config_for(dir.path());

        let output = run(&config).unwrap();
        assert_eq!(output.report.findings().len(), 1);
        assert_eq!(
            output.report.findings()[0].kind,
            FindingKind::MissingPublishDate
        );
        assert!(output.routes.is_empty());
    }

    #[test]
    fn test_unpublish_detected_via_manifest() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "content/post-a.md",
            "+++\ntitle = \"A\"\ndate = \"2024-01-01\"\n+++\n",
        );
        let config = config_for(dir.path());

        let output = run(&config).unwrap();
        assert!(output.report.passed());
        record_manifest(&output, &config).unwrap();

        // Flip the item to draft and run again.
        write_file(
            dir.path(),
            "content/post-a.md",
            "+++\ntitle = \"A\"\ndate = \"2024-01-01\"\ndraft = true\n+++\n",
        );
        let output = run(&config).unwrap();
        let findings = output.report.findings();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::UnpublishedItem);
        // A warning still passes overall
        assert!(output.report.passed());
    }

    #[test]
    fn test_unreadable_root_is_fatal() {
        let config = config_for(Path::new("/nonexistent/blog"));
        assert!(run(&config).is_err());
    }
}
