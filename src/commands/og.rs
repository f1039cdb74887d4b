//! Render a preview image to disk

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::og::{self, ImageRequest, OgQuery};
use crate::Garden;

/// Render the preview for the given parameters into `output`
pub fn run(garden: &Garden, query: OgQuery, output: &Path) -> Result<()> {
    let request = ImageRequest::from_query(query, &garden.config.title);
    let bytes = og::render(&request, &garden.config.watermark)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, &bytes).with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(
        "Rendered {} preview ({} bytes) to {:?}",
        request.glyph().emoji(),
        bytes.len(),
        output
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_png() {
        let dir = TempDir::new().unwrap();
        let garden = Garden::new(dir.path()).unwrap();
        let output = dir.path().join("previews").join("card.png");

        let query = OgQuery {
            title: Some("Hello".to_string()),
            ..Default::default()
        };
        run(&garden, query, &output).unwrap();

        let bytes = fs::read(&output).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}
