//! Remove generated exports

use anyhow::Result;
use std::fs;

use super::build::{API_DIR, SITEMAP_MD, SITEMAP_TXT};
use crate::Garden;

/// Delete the files `build` writes, leaving the rest of the public directory alone
pub fn run(garden: &Garden) -> Result<()> {
    let api_dir = garden.public_dir.join(API_DIR);
    if api_dir.exists() {
        for entry in fs::read_dir(&api_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("md") {
                fs::remove_file(&path)?;
            }
        }
        if fs::read_dir(&api_dir)?.next().is_none() {
            fs::remove_dir(&api_dir)?;
        }
        tracing::info!("Deleted: {:?}", api_dir);
    }

    for name in [SITEMAP_MD, SITEMAP_TXT] {
        let path = garden.public_dir.join(name);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::info!("Deleted: {:?}", path);
        }
    }

    Ok(())
}
