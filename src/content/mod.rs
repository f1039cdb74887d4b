//! Content module - loads, validates and exposes garden entries

mod collection;
pub(crate) mod entry;
mod error;
mod frontmatter;
pub mod loader;

pub use collection::Collection;
pub use entry::{ContentEntry, GrowthStage};
pub use error::ContentError;
pub use frontmatter::{parse_iso_date, FrontMatter, FrontMatterError};
pub use loader::ContentStore;
