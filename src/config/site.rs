//! Site configuration (_config.yml)

use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub home_summary: String,

    // URL
    pub url: String,
    pub collection_path: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Responses
    pub cache_max_age: u32,
    pub content_source: String,

    // Preview images
    pub watermark: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Grimlock.ai".to_string(),
            tagline:
                "A digital garden of AI agents, autonomous coding, and digital familiar philosophy."
                    .to_string(),
            home_summary: "Overview of Grimlock, the digital familiar".to_string(),

            url: "https://grimlock.ai".to_string(),
            collection_path: "garden".to_string(),

            content_dir: "src/content/garden".to_string(),
            public_dir: "public".to_string(),

            cache_max_age: 3600,
            content_source: "grimlock.ai".to_string(),

            watermark: "grimlock.ai".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Absolute URL of the collection index, e.g. `https://grimlock.ai/garden`
    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url(),
            self.collection_path.trim_matches('/')
        )
    }

    /// Absolute URL of a single entry page
    pub fn entry_url(&self, slug: &str) -> String {
        format!("{}/{}", self.collection_url(), slug)
    }

    /// `Cache-Control` value for successful exports
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_max_age)
    }
}
