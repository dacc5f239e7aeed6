//! Taxonomy reconciliation: modules and tags.
//!
//! Builds the bidirectional Module↔ContentItem association and the
//! derived [`TagIndex`]. Both are rebuilt from scratch every run; the
//! tag index is never authored or persisted.
//!
//! Reconciliation is a pure set comparison with no ordering dependency
//! between modules, so the per-module checks run on rayon workers and
//! merge in declaration order.
//!
//! Finding kinds produced here:
//! - `UnknownModuleReference`: item names a key nobody declared
//! - `OrphanedModuleMember`: module lists a slug with no matching item
//! - `ModuleMembershipMismatch`: both sides exist but only one links

use crate::content::{ContentItem, ModuleSet};
use crate::report::{Finding, FindingKind, Report};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// Tag Index
// ============================================================================

/// Derived mapping from tag to the slugs carrying it.
#[derive(Debug, Default)]
pub struct TagIndex {
    map: BTreeMap<String, BTreeSet<String>>,
}

impl TagIndex {
    fn from_items(items: &[ContentItem]) -> Self {
        let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for item in items {
            for tag in &item.tags {
                map.entry(tag.clone()).or_default().insert(item.slug.clone());
            }
        }
        Self { map }
    }

    #[allow(dead_code)]
    pub fn slugs(&self, tag: &str) -> Option<&BTreeSet<String>> {
        self.map.get(tag)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// ============================================================================
// Taxonomy
// ============================================================================

/// The reconciled grouping state for one pipeline run.
#[derive(Debug)]
pub struct Taxonomy {
    /// Authored module declarations (validated against items)
    pub modules: ModuleSet,
    /// Derived tag index
    pub tags: TagIndex,
}

/// Reconcile items against module declarations and derive the tag index.
///
/// Appends findings for every association problem; never aborts.
pub fn build(items: &[ContentItem], modules: &ModuleSet, report: &mut Report) -> Taxonomy {
    let slugs: BTreeSet<&str> = items.iter().map(|i| i.slug.as_str()).collect();
    let declared_module: BTreeMap<&str, Option<&str>> = items
        .iter()
        .map(|i| (i.slug.as_str(), i.module.as_deref()))
        .collect();

    // Module side: every listed member must exist and must point back.
    let module_findings: Vec<Finding> = modules
        .modules
        .par_iter()
        .flat_map_iter(|module| {
            let mut findings = Vec::new();
            for member in &module.members {
                if !slugs.contains(member.as_str()) {
                    findings.push(Finding::new(
                        FindingKind::OrphanedModuleMember,
                        module.key.clone(),
                        format!("module `{}` lists unknown member `{member}`", module.key),
                    ));
                } else if declared_module.get(member.as_str()).copied().flatten()
                    != Some(module.key.as_str())
                {
                    findings.push(Finding::new(
                        FindingKind::ModuleMembershipMismatch,
                        member.clone(),
                        format!(
                            "listed as member of `{}` but its front matter does not name that module",
                            module.key
                        ),
                    ));
                }
            }
            findings
        })
        .collect();
    report.extend(module_findings);

    // Item side: a declared module must exist and must list the item.
    for item in items {
        let Some(key) = item.module.as_deref() else {
            continue;
        };
        match modules.get(key) {
            None => report.push(Finding::new(
                FindingKind::UnknownModuleReference,
                item.slug.clone(),
                format!("front matter names undeclared module `{key}`"),
            )),
            Some(module) if !module.members.iter().any(|m| m == &item.slug) => {
                report.push(Finding::new(
                    FindingKind::ModuleMembershipMismatch,
                    item.slug.clone(),
                    format!("declares module `{key}` but is missing from its members"),
                ));
            }
            Some(_) => {}
        }
    }

    Taxonomy {
        modules: modules.clone(),
        tags: TagIndex::from_items(items),
    }
}
