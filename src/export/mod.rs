//! Exporters - turn the published collection into externally facing formats
//!
//! Every exporter is a pure function of the [`Collection`](crate::content::Collection)
//! and the site configuration that returns a fully formed [`Export`]. The
//! server and the `build` command only decide where the bytes go.

pub mod markdown;
pub mod sitemap;
pub mod urllist;

use crate::content::GrowthStage;

pub const MARKDOWN: &str = "text/markdown; charset=utf-8";
pub const PLAIN_TEXT: &str = "text/plain; charset=utf-8";
pub const PNG: &str = "image/png";

/// A rendered response, independent of any HTTP framework
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub status: u16,
    pub content_type: &'static str,
    /// `None` means the response must not be cached
    pub cache_control: Option<String>,
    /// Extra headers, in emission order
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Export {
    /// 200 response with the given cache policy
    pub fn ok(content_type: &'static str, cache_control: Option<String>, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type,
            cache_control,
            headers: Vec::new(),
            body,
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Look up an extra header by name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as text, for textual exports
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Decoration emoji for a growth stage in text exports
pub fn stage_emoji(stage: Option<GrowthStage>) -> &'static str {
    match stage {
        Some(GrowthStage::Seedling) => "🌱",
        Some(GrowthStage::Budding) => "🌿",
        Some(GrowthStage::Evergreen) => "🌳",
        // Entries without a recognized stage decorate like seedlings
        None => "🌱",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_emoji() {
        assert_eq!(stage_emoji(Some(GrowthStage::Seedling)), "🌱");
        assert_eq!(stage_emoji(Some(GrowthStage::Budding)), "🌿");
        assert_eq!(stage_emoji(Some(GrowthStage::Evergreen)), "🌳");
        assert_eq!(stage_emoji(None), "🌱");
        assert_eq!(stage_emoji(GrowthStage::parse("sapling")), "🌱");
    }

    #[test]
    fn test_header_lookup() {
        let export = Export::ok(PLAIN_TEXT, None, b"x".to_vec()).with_header("X-Growth-Stage", "budding");
        assert_eq!(export.header("x-growth-stage"), Some("budding"));
        assert_eq!(export.header("x-missing"), None);
        assert_eq!(export.text(), "x");
    }
}
