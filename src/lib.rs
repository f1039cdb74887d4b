//! garden-rs: publishes a digital garden in machine-readable formats
//!
//! A single collection of front-matter tagged markdown files is exported as
//! raw markdown, a markdown sitemap, a plain URL list, and Open Graph preview
//! images, either written to disk or served over HTTP.

pub mod commands;
pub mod config;
pub mod content;
pub mod export;
pub mod og;
pub mod server;

use anyhow::Result;
use std::path::Path;

/// The main garden application
#[derive(Clone)]
pub struct Garden {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory holding the garden entries
    pub content_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Garden {
    /// Create a new garden from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        })
    }

    /// Load the content store into an immutable collection snapshot
    pub fn load(&self) -> Result<content::Collection> {
        let entries = content::ContentStore::new(&self.content_dir).load_all()?;
        Ok(content::Collection::new(entries))
    }

    /// Write every export to the public directory
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Remove generated exports
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
