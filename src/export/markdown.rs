//! Raw markdown export (`/api/{slug}.md`)

use super::{Export, MARKDOWN};
use crate::config::SiteConfig;
use crate::content::{Collection, ContentEntry};

/// Render the raw source of a published entry, or a 404 document
pub fn render(collection: &Collection, config: &SiteConfig, slug: &str) -> Export {
    match collection.find_published(slug) {
        Some(entry) => found(entry, config),
        None => not_found(slug),
    }
}

/// Successful export of the entry's source as it was loaded
pub fn found(entry: &ContentEntry, config: &SiteConfig) -> Export {
    Export::ok(MARKDOWN, Some(config.cache_control()), entry.raw.clone().into_bytes())
        .with_header("X-Content-Source", config.content_source.clone())
        .with_header("X-Growth-Stage", entry.growth_stage.as_str())
}

/// 404 document naming the requested slug. Never cached.
pub fn not_found(slug: &str) -> Export {
    let body = format!("# Not Found\n\nNo garden post found with slug: {}", slug);
    Export {
        status: 404,
        content_type: MARKDOWN,
        cache_control: None,
        headers: Vec::new(),
        body: body.into_bytes(),
    }
}

/// Slugs to pre-render as `api/<slug>.md`
pub fn static_paths(collection: &Collection) -> Vec<&str> {
    collection.published_slugs()
}
