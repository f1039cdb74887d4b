//! Open Graph preview images (`/api/og.png`)
//!
//! Rendering is a pure function of the [`ImageRequest`]: no content store,
//! filesystem or network access; fonts and sprites are compiled in. It runs
//! in two steps, [`layout::compose`] places elements on the canvas and
//! [`raster::paint`] draws them, before the result is encoded as PNG.

mod font;
pub mod layout;
pub mod raster;
mod request;

pub use font::{Fonts, Weight};
pub use layout::{Card, TitleTier};
pub use request::{Glyph, ImageRequest, OgQuery};

use image::ImageFormat;
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid embedded font: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("preview image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Render `request` to PNG bytes
pub fn render(request: &ImageRequest, watermark: &str) -> Result<Vec<u8>, RenderError> {
    let fonts = Fonts::embedded()?;
    let card = layout::compose(request, watermark, &fonts);
    let canvas = raster::paint(&card, &fonts)?;

    let mut bytes = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
