//! Content loading errors

use std::path::PathBuf;
use thiserror::Error;

use super::frontmatter::FrontMatterError;

/// A load failure. Any of these aborts the whole build.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema violation in {path}: {source}")]
    SchemaViolation {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("{path} is in a subdirectory; entries must sit directly in the content directory")]
    NestedEntry { path: PathBuf },

    #[error("duplicate slug {slug:?} from {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}
