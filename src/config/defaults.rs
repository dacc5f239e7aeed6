//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use std::path::PathBuf;

    pub fn dir() -> PathBuf {
        "content".into()
    }

    pub fn modules_file() -> PathBuf {
        "modules.toml".into()
    }

    pub fn post_prefix() -> String {
        "/posts/".into()
    }

    pub fn module_prefix() -> String {
        "/modules/".into()
    }
}

// ============================================================================
// [check] Section Defaults
// ============================================================================

pub mod check {
    use std::path::PathBuf;

    pub fn manifest() -> PathBuf {
        ".stanza/manifest.json".into()
    }
}
