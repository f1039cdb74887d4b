//! Human and LLM readable sitemap (`/sitemap.md`)

use super::{stage_emoji, Export, MARKDOWN};
use crate::config::SiteConfig;
use crate::content::{Collection, ContentEntry};

/// Render the markdown sitemap, newest entries first
pub fn render(collection: &Collection, config: &SiteConfig) -> Export {
    let body = document(collection, config);
    Export::ok(MARKDOWN, Some(config.cache_control()), body.into_bytes())
}

/// Published entries by planted date, newest first. Equal dates keep store order.
pub fn sorted_entries(collection: &Collection) -> Vec<&ContentEntry> {
    let mut entries = collection.list_published();
    entries.sort_by(|a, b| b.planted_at.cmp(&a.planted_at));
    entries
}

fn document(collection: &Collection, config: &SiteConfig) -> String {
    let site = config.base_url();
    let index = config.collection_url();
    let entries = sorted_entries(collection);

    let mut lines = vec![
        format!("# {} Sitemap", config.title),
        String::new(),
        config.tagline.clone(),
        String::new(),
        "## Pages".to_string(),
        String::new(),
        format!("- [Home]({}/) — {}", site, config.home_summary),
        format!("- [Garden Index]({}/) — Browse all garden posts", index),
        String::new(),
        "## Garden Posts".to_string(),
        String::new(),
    ];

    lines.extend(entries.iter().map(|entry| entry_line(entry, config)));

    lines.extend([
        String::new(),
        "## Machine-Readable Endpoints".to_string(),
        String::new(),
        format!(
            "- [sitemap.xml]({}/sitemap-index.xml) — XML sitemap for search engines",
            site
        ),
        format!("- [sitemap.txt]({}/sitemap.txt) — Plain text URL list", site),
        format!("- [llms.txt]({}/llms.txt) — Site description for LLMs", site),
        String::new(),
        "## Raw Markdown API".to_string(),
        String::new(),
        "Get raw markdown for any garden post:".to_string(),
        String::new(),
    ]);

    lines.extend(
        entries
            .iter()
            .map(|entry| format!("- [{0}.md]({1}/api/{0}.md)", entry.slug, site)),
    );

    lines.extend([
        String::new(),
        "---".to_string(),
        String::new(),
        "*Generated automatically from garden content.*".to_string(),
    ]);

    lines.join("\n")
}

fn entry_line(entry: &ContentEntry, config: &SiteConfig) -> String {
    let topics = if entry.topics.is_empty() {
        String::new()
    } else {
        format!(" [{}]", entry.topics.join(", "))
    };

    format!(
        "- {} [{}]({}) — {}{}",
        stage_emoji(Some(entry.growth_stage)),
        entry.title,
        config.entry_url(&entry.slug),
        entry.description_or_default(),
        topics
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::entry::tests::entry;
    use crate::content::GrowthStage;

    fn scenario() -> Collection {
        Collection::new(vec![
            entry("a", "2024-01-01", false),
            entry("b", "2024-06-01", false),
            entry("c", "2024-03-01", true),
        ])
    }

    #[test]
    fn test_newest_first_and_drafts_hidden() {
        let export = render(&scenario(), &SiteConfig::default());
        let text = export.text();

        let b = text.find("[Title b]").unwrap();
        let a = text.find("[Title a]").unwrap();
        assert!(b < a);
        assert!(!text.contains("Title c"));
        assert!(!text.contains("/c.md"));
        assert!(!text.contains("/garden/c"));

        let api_b = text.find("- [b.md](https://grimlock.ai/api/b.md)").unwrap();
        let api_a = text.find("- [a.md](https://grimlock.ai/api/a.md)").unwrap();
        assert!(api_b < api_a);
    }

    #[test]
    fn test_equal_dates_keep_store_order() {
        let collection = Collection::new(vec![
            entry("first", "2024-05-05", false),
            entry("older", "2023-01-01", false),
            entry("second", "2024-05-05", false),
            entry("third", "2024-05-05", false),
        ]);
        let slugs: Vec<_> = sorted_entries(&collection)
            .iter()
            .map(|e| e.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["first", "second", "third", "older"]);
    }

    #[test]
    fn test_entry_line_format() {
        let mut e = entry("agents", "2024-02-02", false);
        e.title = "Agent Loops".to_string();
        e.growth_stage = GrowthStage::Evergreen;
        e.topics = vec!["ai".to_string(), "rust".to_string()];
        e.description = Some("How loops converge".to_string());
        assert_eq!(
            entry_line(&e, &SiteConfig::default()),
            "- 🌳 [Agent Loops](https://grimlock.ai/garden/agents) — How loops converge [ai, rust]"
        );

        e.topics.clear();
        e.description = None;
        e.growth_stage = GrowthStage::Budding;
        assert_eq!(
            entry_line(&e, &SiteConfig::default()),
            "- 🌿 [Agent Loops](https://grimlock.ai/garden/agents) — A budding post."
        );
    }

    #[test]
    fn test_document_structure() {
        let export = render(&scenario(), &SiteConfig::default());
        assert_eq!(export.status, 200);
        assert_eq!(export.content_type, MARKDOWN);
        assert_eq!(export.cache_control.as_deref(), Some("public, max-age=3600"));

        let text = export.text();
        assert!(text.starts_with("# Grimlock.ai Sitemap\n\n"));
        assert!(text.ends_with("*Generated automatically from garden content.*"));

        let sections = [
            "## Pages",
            "## Garden Posts",
            "## Machine-Readable Endpoints",
            "## Raw Markdown API",
        ];
        let positions: Vec<_> = sections.iter().map(|s| text.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(text.contains("- [Home](https://grimlock.ai/) — "));
        assert!(text.contains("- [Garden Index](https://grimlock.ai/garden/) — Browse all garden posts"));
        assert!(text.contains("(https://grimlock.ai/sitemap-index.xml)"));
        assert!(text.contains("(https://grimlock.ai/llms.txt)"));
    }

    #[test]
    fn test_empty_collection() {
        let text = document(&Collection::default(), &SiteConfig::default());
        assert!(text.contains("## Garden Posts\n\n\n## Machine-Readable Endpoints"));
    }
}
