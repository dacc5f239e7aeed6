//! Slug derivation and validation.
//!
//! Slugs identify content items in URLs. They are derived from the
//! item's path relative to the content directory, unless the front
//! matter carries an explicit `slug` override.

use deunicode::deunicode;
use std::path::Path;

/// Convert arbitrary text to a lowercase kebab-case slug.
///
/// Non-ASCII text is transliterated first, then every run of
/// non-alphanumeric characters collapses into a single `-`.
///
/// | Input | Output |
/// |-------|--------|
/// | `The DAMP Principle` | `the-damp-principle` |
/// | `Réadabilité & Flow` | `readabilite-and-flow` |
/// | `hello__world--` | `hello-world` |
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_sep = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    slug
}

/// Derive a slug from a content file path relative to the content dir.
///
/// Strips the `.md` extension and slugifies the file stem only; the
/// directory part is organizational and does not affect identity.
///
/// | Relative path | Slug |
/// |---------------|------|
/// | `posts/hello-world.md` | `hello-world` |
/// | `readability/The DAMP Principle.md` | `the-damp-principle` |
pub fn slug_from_path(relative: &Path) -> String {
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    slugify(&stem)
}

/// Check that a slug is already in canonical form.
///
/// Canonical: non-empty, lowercase ASCII alphanumerics and `-`, no
/// leading/trailing/doubled `-`. The same policy applies to tags.
pub fn is_canonical(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}
