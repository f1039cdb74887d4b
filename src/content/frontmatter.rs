//! Front-matter parsing and schema validation

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use super::GrowthStage;

/// Reasons a front-matter block fails the schema
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("missing front-matter block")]
    Missing,

    #[error("front-matter block is never closed")]
    Unterminated,

    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("`{field}` is not an ISO-8601 date: {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

/// Front-matter of a garden entry
#[derive(Debug, Clone, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "growthStage", default)]
    pub growth_stage: GrowthStage,
    #[serde(default)]
    pub topics: Vec<String>,
    pub planted: String,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub draft: bool,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}');
        let rest = content
            .strip_prefix("---")
            .ok_or(FrontMatterError::Missing)?;
        let rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .ok_or(FrontMatterError::Missing)?;

        let (yaml, remaining) = split_closing_fence(rest).ok_or(FrontMatterError::Unterminated)?;
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        let fm: FrontMatter = serde_yaml::from_str(yaml)?;
        Ok((fm, remaining))
    }

    /// Parse the planted date, validating `updated` along the way
    pub fn validate(&self) -> Result<DateTime<Utc>, FrontMatterError> {
        let planted = parse_iso_date(&self.planted).ok_or_else(|| FrontMatterError::InvalidDate {
            field: "planted",
            value: self.planted.clone(),
        })?;

        if let Some(updated) = &self.updated {
            if parse_iso_date(updated).is_none() {
                return Err(FrontMatterError::InvalidDate {
                    field: "updated",
                    value: updated.clone(),
                });
            }
        }

        Ok(planted)
    }
}

/// Split `rest` at the first line consisting of `---`
fn split_closing_fence(rest: &str) -> Option<(&str, &str)> {
    if let Some(after) = rest.strip_prefix("---") {
        if after.is_empty() || after.starts_with(['\n', '\r']) {
            return Some(("", after));
        }
    }

    for (pos, _) in rest.match_indices("\n---") {
        let after = &rest[pos + 4..];
        if after.is_empty() || after.starts_with(['\n', '\r']) {
            return Some((&rest[..pos], after));
        }
    }

    None
}

/// Parse an ISO-8601 date or date-time. Values without an offset are UTC.
pub fn parse_iso_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
