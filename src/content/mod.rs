//! Content model: items, front matter, module declarations, loading.

pub mod frontmatter;
pub mod item;
pub mod load;
pub mod modules;

pub use item::{ContentItem, DraftState};
pub use load::{CorpusError, LoadedCorpus, load_corpus};
pub use modules::{Module, ModuleSet};
