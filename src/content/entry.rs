//! Garden entry model

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Maturity of a garden entry. Only drives display decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    #[default]
    Seedling,
    Budding,
    Evergreen,
}

impl GrowthStage {
    /// Lowercase name, as written in front-matter
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Seedling => "seedling",
            GrowthStage::Budding => "budding",
            GrowthStage::Evergreen => "evergreen",
        }
    }

    /// Parse a stage name, `None` for anything outside the three stages
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "seedling" => Some(GrowthStage::Seedling),
            "budding" => Some(GrowthStage::Budding),
            "evergreen" => Some(GrowthStage::Evergreen),
            _ => None,
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One published unit of the garden
#[derive(Debug, Clone)]
pub struct ContentEntry {
    /// URL-friendly identifier derived from the file name
    pub slug: String,

    /// Display title
    pub title: String,

    /// Optional summary
    pub description: Option<String>,

    /// Maturity tag
    pub growth_stage: GrowthStage,

    /// Ordered topic tags
    pub topics: Vec<String>,

    /// Planted date as written in front-matter
    pub planted: String,

    /// Parsed planted date, the ordering key
    pub planted_at: DateTime<Utc>,

    /// Last updated date as written in front-matter
    pub updated: Option<String>,

    /// Drafts never leave the store
    pub draft: bool,

    /// Markdown after the front-matter block
    pub body: String,

    /// Unmodified file contents
    pub raw: String,

    /// Full source file path
    pub path: PathBuf,
}

impl ContentEntry {
    /// Description, or the synthesized `A <stage> post.` fallback
    pub fn description_or_default(&self) -> String {
        match &self.description {
            Some(description) if !description.is_empty() => description.clone(),
            _ => format!("A {} post.", self.growth_stage),
        }
    }
}
