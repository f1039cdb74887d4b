//! Rasterizes a laid out [`Card`] into an RGB image

use ab_glyph::{point, Font, ScaleFont};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb as Pixel, RgbImage};

use super::font::{self, Fonts};
use super::layout::{Card, Fill, Node, Rgb, TextBlock};
use super::request::Glyph;
use super::RenderError;

/// Noto Emoji has no dinosaur, so the fallback glyph ships as a sprite
static DINOSAUR: &[u8] = include_bytes!("../../assets/sprites/dinosaur.png");

/// How a stage glyph is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emblem {
    /// Monochrome emoji outline in the given colour
    Outline(char, Rgb),
    /// Full-colour PNG
    Sprite(&'static [u8]),
}

fn emblem(glyph: Glyph) -> Emblem {
    match glyph {
        Glyph::Seedling => Emblem::Outline('🌱', [0x8b, 0xd4, 0x6e]),
        Glyph::Budding => Emblem::Outline('🌿', [0x4c, 0xaf, 0x50]),
        Glyph::Evergreen => Emblem::Outline('🌳', [0x2e, 0x8b, 0x3a]),
        Glyph::Fallback => Emblem::Sprite(DINOSAUR),
    }
}

/// Paint every node of the card onto a fresh canvas
pub fn paint(card: &Card, fonts: &Fonts) -> Result<RgbImage, RenderError> {
    let mut canvas = RgbImage::from_pixel(card.width, card.height, Pixel(card.background));

    for node in &card.nodes {
        match node {
            Node::Glyph { glyph, x, y, size } => {
                draw_emblem(&mut canvas, fonts, emblem(*glyph), *x, *y, *size)?
            }
            Node::Label(text) | Node::Description(text) | Node::Watermark(text) => {
                draw_text(&mut canvas, fonts, text)
            }
            Node::Title { text, .. } => draw_text(&mut canvas, fonts, text),
        }
    }

    Ok(canvas)
}

/// Draw the emblem centred in the `size` square at (`x`, `y`)
fn draw_emblem(
    canvas: &mut RgbImage,
    fonts: &Fonts,
    emblem: Emblem,
    x: i32,
    y: i32,
    size: u32,
) -> Result<(), RenderError> {
    match emblem {
        Emblem::Outline(c, color) => {
            let face = fonts.emoji();
            let glyph = face
                .glyph_id(c)
                .with_scale_and_position(font::em_scale(face, size), point(0.0, 0.0));
            if let Some(outlined) = face.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let left = x as f32 + (size as f32 - bounds.width()) / 2.0;
                let top = y as f32 + (size as f32 - bounds.height()) / 2.0;
                outlined.draw(|gx, gy, coverage| {
                    blend(
                        canvas,
                        left.round() as i32 + gx as i32,
                        top.round() as i32 + gy as i32,
                        color,
                        coverage,
                    )
                });
            }
        }
        Emblem::Sprite(bytes) => {
            let sprite = image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8();
            let sprite = imageops::resize(&sprite, size, size, FilterType::Triangle);
            for (sx, sy, pixel) in sprite.enumerate_pixels() {
                let [r, g, b, a] = pixel.0;
                blend(
                    canvas,
                    x + sx as i32,
                    y + sy as i32,
                    [r, g, b],
                    a as f32 / 255.0,
                );
            }
        }
    }
    Ok(())
}

fn draw_text(canvas: &mut RgbImage, fonts: &Fonts, text: &TextBlock) {
    let block_width = text.width.max(1.0);
    let (ascent, descent) = font::vertical_metrics(fonts.face(text.weight), text.size);
    // Half-leading above the content area, as in CSS
    let baseline_offset = (text.line_height as f32 - (ascent - descent)) / 2.0 + ascent;

    for (row, line) in text.lines.iter().enumerate() {
        let baseline = text.y as f32 + row as f32 * text.line_height as f32 + baseline_offset;
        let mut caret = text.x as f32;

        for c in line.chars() {
            let (face, id) = fonts.resolve(text.weight, c);
            let scale = font::em_scale(face, text.size);
            let advance = face.as_scaled(scale).h_advance(id);
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));

            if let Some(outlined) = face.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i32 + gx as i32;
                    let py = bounds.min.y as i32 + gy as i32;
                    let color = match text.fill {
                        Fill::Solid(color) => color,
                        Fill::Gradient { from, to } => {
                            lerp(from, to, (px as f32 - text.x as f32) / block_width)
                        }
                    };
                    blend(canvas, px, py, color, coverage);
                });
            }

            caret += advance + text.letter_spacing;
        }
    }
}

/// Mix `color` over the pixel at (`x`, `y`) with `alpha` coverage,
/// ignoring anything outside the canvas
fn blend(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb, alpha: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha == 0.0 {
        return;
    }
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    pixel.0 = lerp(pixel.0, color, alpha);
}

fn lerp(from: Rgb, to: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    [mix(from[0], to[0]), mix(from[1], to[1]), mix(from[2], to[2])]
}
