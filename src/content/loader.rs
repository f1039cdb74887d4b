//! Content store - loads garden entries from the content directory

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentEntry, ContentError, FrontMatter};

/// Loads and validates every entry in the content directory
pub struct ContentStore<'a> {
    content_dir: &'a Path,
}

impl<'a> ContentStore<'a> {
    /// Create a store rooted at `content_dir`
    pub fn new(content_dir: &'a Path) -> Self {
        Self { content_dir }
    }

    /// Load every entry, drafts included, in file-name order.
    ///
    /// Fails on the first entry that does not satisfy the schema; a partial
    /// collection is never returned. Entries must sit directly in the content
    /// directory: a markdown file in a subdirectory is an error.
    pub fn load_all(&self) -> Result<Vec<ContentEntry>, ContentError> {
        if !self.content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", self.content_dir);
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for dir_entry in WalkDir::new(self.content_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let dir_entry = dir_entry.map_err(|e| ContentError::Io {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.content_dir.to_path_buf()),
                source: e.into(),
            })?;
            let path = dir_entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }
            if dir_entry.depth() > 1 {
                return Err(ContentError::NestedEntry {
                    path: path.to_path_buf(),
                });
            }

            let entry = load_entry(path)?;
            if let Some(first) = seen.get(&entry.slug) {
                return Err(ContentError::DuplicateSlug {
                    slug: entry.slug,
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }
            seen.insert(entry.slug.clone(), path.to_path_buf());

            tracing::debug!(
                "Loaded {} ({}, draft={})",
                entry.slug,
                entry.growth_stage,
                entry.draft
            );
            entries.push(entry);
        }

        tracing::info!(
            "Loaded {} entries from {:?}",
            entries.len(),
            self.content_dir
        );

        Ok(entries)
    }
}

/// Load a single entry from a file
fn load_entry(path: &Path) -> Result<ContentEntry, ContentError> {
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let schema_violation = |source| ContentError::SchemaViolation {
        path: path.to_path_buf(),
        source,
    };
    let (fm, body) = FrontMatter::parse(&raw).map_err(schema_violation)?;
    let planted_at = fm.validate().map_err(schema_violation)?;
    let body = body.to_string();

    Ok(ContentEntry {
        slug: slug_for(path),
        title: fm.title,
        description: fm.description,
        growth_stage: fm.growth_stage,
        topics: fm.topics,
        planted: fm.planted,
        planted_at,
        updated: fm.updated,
        draft: fm.draft,
        body,
        path: path.to_path_buf(),
        raw,
    })
}

/// Slug derived from the file name
pub fn slug_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled");
    slug::slugify(stem)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
