//! Read-only view over the loaded store

use super::ContentEntry;

/// Immutable snapshot of the garden, built once per load and shared by
/// every exporter.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    entries: Vec<ContentEntry>,
}

impl Collection {
    /// Wrap entries in store order
    pub fn new(entries: Vec<ContentEntry>) -> Self {
        Self { entries }
    }

    /// Every entry, drafts included
    pub fn all(&self) -> &[ContentEntry] {
        &self.entries
    }

    /// Published entries (`draft == false`) in store order
    pub fn list_published(&self) -> Vec<&ContentEntry> {
        self.published().collect()
    }

    /// Look up a published entry; drafts are indistinguishable from unknown slugs
    pub fn find_published(&self, slug: &str) -> Option<&ContentEntry> {
        self.published().find(|e| e.slug == slug)
    }

    /// Slugs to pre-render, exactly the published set
    pub fn published_slugs(&self) -> Vec<&str> {
        self.published().map(|e| e.slug.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn draft_count(&self) -> usize {
        self.entries.iter().filter(|e| e.draft).count()
    }

    fn published(&self) -> impl Iterator<Item = &ContentEntry> {
        self.entries.iter().filter(|e| !e.draft)
    }
}
