//! Plain URL list (`/sitemap.txt`)

use super::{Export, PLAIN_TEXT};
use crate::config::SiteConfig;
use crate::content::Collection;

/// Site root, collection index, then one URL per published entry.
///
/// Entries stay in store order; unlike the markdown sitemap no date sort is
/// applied.
pub fn render(collection: &Collection, config: &SiteConfig) -> Export {
    let mut urls = vec![config.base_url().to_string(), config.collection_url()];
    urls.extend(
        collection
            .list_published()
            .iter()
            .map(|entry| config.entry_url(&entry.slug)),
    );

    Export::ok(
        PLAIN_TEXT,
        Some(config.cache_control()),
        urls.join("\n").into_bytes(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::entry::tests::entry;

    #[test]
    fn test_store_order_without_drafts() {
        let collection = Collection::new(vec![
            entry("a", "2024-01-01", false),
            entry("b", "2024-06-01", false),
            entry("c", "2024-03-01", true),
        ]);
        let export = render(&collection, &SiteConfig::default());

        assert_eq!(
            export.text(),
            "https://grimlock.ai\n\
             https://grimlock.ai/garden\n\
             https://grimlock.ai/garden/a\n\
             https://grimlock.ai/garden/b"
        );
        assert_eq!(export.content_type, "text/plain; charset=utf-8");
        assert_eq!(export.cache_control.as_deref(), Some("public, max-age=3600"));
    }

    #[test]
    fn test_trailing_slash_in_site_url() {
        let config = SiteConfig {
            url: "https://example.com/".to_string(),
            ..Default::default()
        };
        let export = render(&Collection::default(), &config);
        assert_eq!(export.text(), "https://example.com\nhttps://example.com/garden");
    }
}
