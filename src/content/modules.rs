//! Authored module declarations.
//!
//! Modules (categories) are declared in one `modules.toml` next to the
//! content dir:
//!
//! ```toml
//! [[module]]
//! key = "readability-flow"
//! title = "Readability & Flow"
//! members = ["the-damp-principle", "paragraph-rhythm"]
//! ```
//!
//! `members` is an ordered sequence: it is the authored reading order
//! for the module's index page. Cross-checking members against actual
//! content items happens in the taxonomy stage, not here.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

/// One named grouping of content items.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Module {
    /// Unique key, referenced by item front matter
    pub key: String,
    /// Display title for the module index page
    pub title: String,
    /// Ordered member slugs
    #[serde(default)]
    pub members: Vec<String>,
}

/// The full set of authored modules.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleSet {
    #[serde(default, rename = "module")]
    pub modules: Vec<Module>,
}

impl ModuleSet {
    /// Load declarations from `modules.toml`.
    ///
    /// A missing file means the corpus simply has no modules. A file
    /// that exists but cannot be read or parsed is fatal, as is a
    /// duplicated module key: there is no sensible way to reconcile
    /// membership against an ambiguous declaration.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("cannot read module declarations `{}`", path.display()))?;
        let set: Self = toml::from_str(&raw)
            .with_context(|| format!("cannot parse module declarations `{}`", path.display()))?;

        let mut seen = BTreeMap::new();
        for module in &set.modules {
            if let Some(first) = seen.insert(module.key.as_str(), &module.title) {
                bail!(
                    "duplicate module key `{}` (`{}` vs `{}`)",
                    module.key,
                    first,
                    module.title
                );
            }
        }

        Ok(set)
    }

    /// Look up a module by key.
    pub fn get(&self, key: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_decl(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_declarations() {
        let file = write_decl(
            r#"
[[module]]
key = "readability-flow"
title = "Readability & Flow"
members = ["the-damp-principle", "paragraph-rhythm"]

[[module]]
key = "naming"
title = "Naming"
"#,
        );
        let set = ModuleSet::from_path(file.path()).unwrap();
        assert_eq!(set.modules.len(), 2);
        assert!(set.contains("readability-flow"));
        assert_eq!(
            set.get("readability-flow").unwrap().members,
            ["the-damp-principle", "paragraph-rhythm"]
        );
        assert!(set.get("naming").unwrap().members.is_empty());
    }

    #[test]
    fn test_missing_file_is_empty_set() {
        let set = ModuleSet::from_path(Path::new("/nonexistent/modules.toml")).unwrap();
        assert!(set.modules.is_empty());
    }

    #[test]
    fn test_duplicate_key_is_fatal() {
        let file = write_decl(
            r#"
[[module]]
key = "naming"
title = "Naming"

[[module]]
key = "naming"
title = "Naming, Again"
"#,
        );
        let err = ModuleSet::from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("duplicate module key"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let file = write_decl("[[module]]\nkey = \"a\"\ntitle = \"A\"\ncolor = \"red\"\n");
        assert!(ModuleSet::from_path(file.path()).is_err());
    }
}
