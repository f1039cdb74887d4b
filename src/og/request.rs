//! Preview image parameters

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;

use crate::config::SiteConfig;
use crate::content::{ContentEntry, GrowthStage};

/// Characters left unescaped in query values (RFC 3986 unreserved)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Raw query string of `/api/og.png`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OgQuery {
    pub title: Option<String>,
    pub stage: Option<String>,
    pub description: Option<String>,
}

/// Marker drawn next to the title, chosen by stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Seedling,
    Budding,
    Evergreen,
    /// Any stage outside the three known ones, including none
    Fallback,
}

impl Glyph {
    pub fn for_stage(stage: &str) -> Self {
        match GrowthStage::parse(stage) {
            Some(GrowthStage::Seedling) => Glyph::Seedling,
            Some(GrowthStage::Budding) => Glyph::Budding,
            Some(GrowthStage::Evergreen) => Glyph::Evergreen,
            None => Glyph::Fallback,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Glyph::Seedling => "🌱",
            Glyph::Budding => "🌿",
            Glyph::Evergreen => "🌳",
            Glyph::Fallback => "🦖",
        }
    }
}

/// Parameters of one preview render, with defaults already applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub title: String,
    /// Shown verbatim (uppercased) even when it is not a known stage
    pub stage: String,
    pub description: Option<String>,
}

impl ImageRequest {
    /// Apply defaults: empty values count as absent, the title falls back to
    /// the site name.
    pub fn from_query(query: OgQuery, default_title: &str) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        Self {
            title: non_empty(query.title).unwrap_or_else(|| default_title.to_string()),
            stage: non_empty(query.stage).unwrap_or_default(),
            description: non_empty(query.description),
        }
    }

    /// Request describing a garden entry
    pub fn for_entry(entry: &ContentEntry) -> Self {
        Self {
            title: entry.title.clone(),
            stage: entry.growth_stage.as_str().to_string(),
            description: entry.description.clone().filter(|d| !d.is_empty()),
        }
    }

    pub fn glyph(&self) -> Glyph {
        Glyph::for_stage(&self.stage)
    }

    /// Percent-encoded query string, omitting empty parameters
    pub fn query_string(&self) -> String {
        let mut params = vec![("title", self.title.as_str())];
        if !self.stage.is_empty() {
            params.push(("stage", self.stage.as_str()));
        }
        if let Some(description) = &self.description {
            params.push(("description", description.as_str()));
        }

        params
            .iter()
            .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Absolute URL of the rendered preview
    pub fn url(&self, config: &SiteConfig) -> String {
        format!("{}/api/og.png?{}", config.base_url(), self.query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::entry::tests::entry;

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(Glyph::for_stage("seedling"), Glyph::Seedling);
        assert_eq!(Glyph::for_stage("budding"), Glyph::Budding);
        assert_eq!(Glyph::for_stage("evergreen"), Glyph::Evergreen);
        assert_eq!(Glyph::for_stage("unknown-value"), Glyph::Fallback);
        assert_eq!(Glyph::for_stage(""), Glyph::Fallback);
        assert_eq!(Glyph::Evergreen.emoji(), "🌳");
        assert_eq!(Glyph::Fallback.emoji(), "🦖");
    }

    #[test]
    fn test_defaults_applied_once() {
        let request = ImageRequest::from_query(OgQuery::default(), "Grimlock.ai");
        assert_eq!(request.title, "Grimlock.ai");
        assert_eq!(request.stage, "");
        assert_eq!(request.description, None);
        assert_eq!(request.glyph(), Glyph::Fallback);

        let request = ImageRequest::from_query(
            OgQuery {
                title: Some(String::new()),
                stage: Some("budding".to_string()),
                description: Some(String::new()),
            },
            "Grimlock.ai",
        );
        assert_eq!(request.title, "Grimlock.ai");
        assert_eq!(request.glyph(), Glyph::Budding);
        assert_eq!(request.description, None);
    }

    #[test]
    fn test_url_for_entry() {
        let mut e = entry("loops", "2024-01-01", false);
        e.title = "Agent Loops & You".to_string();
        e.description = Some("Why it works".to_string());

        let url = ImageRequest::for_entry(&e).url(&SiteConfig::default());
        assert_eq!(
            url,
            "https://grimlock.ai/api/og.png?title=Agent%20Loops%20%26%20You&stage=seedling&description=Why%20it%20works"
        );
    }
}
