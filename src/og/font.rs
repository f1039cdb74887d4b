//! Embedded typefaces and text metrics
//!
//! Text is set in DejaVu Sans, regular and bold. A character the text face
//! lacks is looked up in Noto Emoji before falling back to the face's own
//! `.notdef` box. Sizes are CSS-style: one em is `size` pixels.

use ab_glyph::{Font, FontRef, GlyphId, InvalidFont, PxScale, ScaleFont};

static SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static SANS_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");
static EMOJI: &[u8] = include_bytes!("../../assets/fonts/NotoEmoji-Regular.ttf");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// The embedded faces
#[derive(Debug, Clone)]
pub struct Fonts {
    regular: FontRef<'static>,
    bold: FontRef<'static>,
    emoji: FontRef<'static>,
}

impl Fonts {
    pub fn embedded() -> Result<Self, InvalidFont> {
        Ok(Self {
            regular: FontRef::try_from_slice(SANS)?,
            bold: FontRef::try_from_slice(SANS_BOLD)?,
            emoji: FontRef::try_from_slice(EMOJI)?,
        })
    }

    pub fn face(&self, weight: Weight) -> &FontRef<'static> {
        match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        }
    }

    pub fn emoji(&self) -> &FontRef<'static> {
        &self.emoji
    }

    /// Face and glyph that draw `c`
    pub fn resolve(&self, weight: Weight, c: char) -> (&FontRef<'static>, GlyphId) {
        let face = self.face(weight);
        let id = face.glyph_id(c);
        if id.0 == 0 {
            let fallback = self.emoji.glyph_id(c);
            if fallback.0 != 0 {
                return (&self.emoji, fallback);
            }
        }
        (face, id)
    }

    /// Horizontal advance of `c`
    pub fn advance(&self, weight: Weight, c: char, size: u32) -> f32 {
        let (face, id) = self.resolve(weight, c);
        face.as_scaled(em_scale(face, size)).h_advance(id)
    }

    /// Rendered width of a single line
    pub fn text_width(&self, weight: Weight, text: &str, size: u32, letter_spacing: f32) -> f32 {
        text.chars()
            .map(|c| self.advance(weight, c, size) + letter_spacing)
            .sum()
    }

    /// Greedy word wrap so that no line exceeds `max_width` pixels.
    ///
    /// Words wider than a whole line are split at character boundaries.
    pub fn wrap(
        &self,
        weight: Weight,
        text: &str,
        size: u32,
        letter_spacing: f32,
        max_width: f32,
    ) -> Vec<String> {
        let fits = |line: &str| self.text_width(weight, line, size, letter_spacing) <= max_width;
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if fits(&candidate) {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            for c in word.chars() {
                current.push(c);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Scale at which one em of `font` is `size` pixels
pub fn em_scale(font: &FontRef<'_>, size: u32) -> PxScale {
    let units_per_em = font.units_per_em().unwrap_or(1000.0);
    PxScale::from(size as f32 * font.height_unscaled() / units_per_em)
}

/// Ascent and (negative) descent of `font` at `size`
pub fn vertical_metrics(font: &FontRef<'_>, size: u32) -> (f32, f32) {
    let scaled = font.as_scaled(em_scale(font, size));
    (scaled.ascent(), scaled.descent())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fonts() -> Fonts {
        Fonts::embedded().unwrap()
    }

    #[test]
    fn test_non_ascii_has_real_glyphs() {
        let fonts = fonts();
        for weight in [Weight::Regular, Weight::Bold] {
            for c in ['é', 'ü', 'ß', '—', '’', 'Ж'] {
                let (face, id) = fonts.resolve(weight, c);
                assert_ne!(id, GlyphId(0), "{c} in {weight:?}");
                assert!(std::ptr::eq(face, fonts.face(weight)));
            }
        }
    }

    #[test]
    fn test_emoji_falls_back_to_emoji_face() {
        let fonts = fonts();
        for c in ['🌱', '🌿', '🌳'] {
            let (face, id) = fonts.resolve(Weight::Bold, c);
            assert_ne!(id, GlyphId(0));
            assert!(std::ptr::eq(face, fonts.emoji()));
        }
    }

    #[test]
    fn test_unknown_character_uses_notdef() {
        let fonts = fonts();
        let (face, id) = fonts.resolve(Weight::Regular, '\u{E000}');
        assert_eq!(id, GlyphId(0));
        assert!(std::ptr::eq(face, fonts.face(Weight::Regular)));
    }

    #[test]
    fn test_metrics_scale_with_size() {
        let fonts = fonts();
        let small = fonts.text_width(Weight::Regular, "garden", 24, 0.0);
        let large = fonts.text_width(Weight::Regular, "garden", 48, 0.0);
        assert!(small > 0.0);
        assert!((large - 2.0 * small).abs() < 0.01);

        let spaced = fonts.text_width(Weight::Regular, "garden", 24, 2.4);
        assert!((spaced - small - 6.0 * 2.4).abs() < 0.01);

        assert!(
            fonts.text_width(Weight::Bold, "garden", 24, 0.0)
                > fonts.text_width(Weight::Regular, "garden", 24, 0.0)
        );
    }

    #[test]
    fn test_vertical_metrics() {
        let fonts = fonts();
        let (ascent, descent) = vertical_metrics(fonts.face(Weight::Regular), 64);
        assert!(ascent > 0.0 && ascent < 64.0);
        assert!(descent < 0.0);
    }

    #[test]
    fn test_wrap_words() {
        let fonts = fonts();
        let max = fonts.text_width(Weight::Bold, "philosophy", 64, 0.0) + 1.0;
        let lines = fonts.wrap(Weight::Bold, "digital familiar philosophy", 64, 0.0, max);
        assert_eq!(lines, vec!["digital", "familiar", "philosophy"]);

        let lines = fonts.wrap(Weight::Bold, "a b c d", 64, 0.0, max);
        assert_eq!(lines, vec!["a b c d"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let fonts = fonts();
        let max = fonts.text_width(Weight::Regular, "abcdefgh", 28, 0.0) + 0.5;
        let lines = fonts.wrap(Weight::Regular, "abcdefghijklmnop", 28, 0.0, max);

        assert_eq!(lines[0], "abcdefgh");
        assert_eq!(lines.concat(), "abcdefghijklmnop");
        for line in &lines {
            assert!(fonts.text_width(Weight::Regular, line, 28, 0.0) <= max);
        }
    }

    #[test]
    fn test_wrap_empty() {
        assert!(fonts().wrap(Weight::Regular, "   ", 64, 0.0, 480.0).is_empty());
    }
}
