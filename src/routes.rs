//! Publication planning: the final route table.
//!
//! Given a validated corpus, decide the set of URL paths to emit:
//! one page per publishable item, one index page per module. Drafts
//! are excluded unless preview mode asks for them; items barred by the
//! integrity validator never get a route.
//!
//! Item and module pages share one path namespace, so uniqueness is
//! re-validated here as the terminal check: any collision is reported
//! as `DuplicateRoute` and the first occupant keeps the path.
//!
//! The table is what the external rendering collaborator consumes; it
//! serializes to JSON together with the published-slug manifest used by
//! the next run's unpublish detection.

use crate::config::SiteConfig;
use crate::content::ContentItem;
use crate::report::{Finding, FindingKind, Report};
use crate::taxonomy::Taxonomy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

// ============================================================================
// Route Table
// ============================================================================

/// What a URL path points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RouteTarget {
    /// A content item page
    Item { slug: String, title: String },
    /// A module index page
    ModuleIndex { key: String, title: String },
}

/// Final mapping from URL path to content entity.
#[derive(Debug, Default, Serialize)]
pub struct RouteTable {
    routes: BTreeMap<String, RouteTarget>,
}

impl RouteTable {
    #[allow(dead_code)]
    pub fn get(&self, path: &str) -> Option<&RouteTarget> {
        self.routes.get(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Slugs of the items routed by this table.
    pub fn item_slugs(&self) -> BTreeSet<String> {
        self.routes
            .values()
            .filter_map(|t| match t {
                RouteTarget::Item { slug, .. } => Some(slug.clone()),
                RouteTarget::ModuleIndex { .. } => None,
            })
            .collect()
    }

    /// Pretty JSON for the rendering collaborator.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.routes)
    }
}

/// Plan the route table from validated items and taxonomy.
///
/// `barred` holds slugs the integrity validator excluded from
/// publication. Items are routed in slug order, then module indexes in
/// declaration order, so the outcome is deterministic.
pub fn plan(
    items: &[ContentItem],
    taxonomy: &Taxonomy,
    barred: &BTreeSet<String>,
    config: &SiteConfig,
    report: &mut Report,
) -> RouteTable {
    let include_drafts = config.check.include_drafts;
    let mut table = RouteTable::default();

    let mut claim = |path: String, target: RouteTarget, report: &mut Report| {
        if let Some(occupant) = table.routes.get(&path) {
            report.push(Finding::new(
                FindingKind::DuplicateRoute,
                path.clone(),
                format!("already routed to {occupant:?}"),
            ));
        } else {
            table.routes.insert(path, target);
        }
    };

    for item in items {
        if barred.contains(&item.slug) {
            continue;
        }
        if item.is_draft() && !include_drafts {
            continue;
        }
        let path = format!("{}{}/", config.content.post_prefix, item.slug);
        claim(
            path,
            RouteTarget::Item {
                slug: item.slug.clone(),
                title: item.title.clone(),
            },
            report,
        );
    }

    for module in &taxonomy.modules.modules {
        let path = format!("{}{}/", config.content.module_prefix, module.key);
        claim(
            path,
            RouteTarget::ModuleIndex {
                key: module.key.clone(),
                title: module.title.clone(),
            },
            report,
        );
    }

    table
}

// ============================================================================
// Published-Slug Manifest
// ============================================================================

/// Record of which item slugs were published by the last passing run.
///
/// Derived state, rewritten on every successful non-preview run; the
/// next run reads it to notice unpublish transitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub published: Vec<String>,
}

impl Manifest {
    pub fn from_routes(table: &RouteTable) -> Self {
        Self {
            published: table.item_slugs().into_iter().collect(),
        }
    }

    /// Load a previous manifest. Missing or corrupt files mean "no
    /// previous run": unpublish detection simply stays quiet.
    pub fn load(path: &Path) -> Option<Self> {
        let raw = fs::read_to_string(path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create `{}`", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("cannot write manifest `{}`", path.display()))
    }

    pub fn published_set(&self) -> BTreeSet<String> {
        self.published.iter().cloned().collect()
    }
}
