use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use egui::Vec2;
use log::debug;

use crate::error::{Error, Result};

/// Fonts tried in order for each character, matching egui's proportional family
const FALLBACK_CHAIN: [&str; 3] = ["Ubuntu-Light", "NotoEmoji-Regular", "emoji-icon-font"];

/// Drawn in place of characters no font covers, same order as egui's text layout
const REPLACEMENT_CHARS: [char; 2] = ['\u{25FB}', '?'];

/// Coverage mask of a laid-out text run, in device pixels
#[derive(Debug, Clone)]
pub(crate) struct GlyphMask {
    pub width: usize,
    pub height: usize,
    /// Row-major coverage in `0.0..=1.0`
    pub coverage: Vec<f32>,
    /// Position of the run centre inside the mask
    pub center: Vec2,
}

impl GlyphMask {
    /// Bilinear sample at a mask-space position, zero outside
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let x = x - 0.5;
        let y = y - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let at = |ix: f32, iy: f32| -> f32 {
            if ix < 0.0 || iy < 0.0 || ix >= self.width as f32 || iy >= self.height as f32 {
                0.0
            } else {
                self.coverage[iy as usize * self.width + ix as usize]
            }
        };

        let top = at(x0, y0) * (1.0 - fx) + at(x0 + 1.0, y0) * fx;
        let bottom = at(x0, y0 + 1.0) * (1.0 - fx) + at(x0 + 1.0, y0 + 1.0) * fx;
        top * (1.0 - fy) + bottom * fy
    }
}

/// Outline fonts used to rasterise sticker glyphs off screen.
///
/// These are the same font files egui ships, so an exported sticker looks like
/// the one on the live canvas.
#[derive(Clone)]
pub struct GlyphSet {
    fonts: Vec<FontArc>,
}

impl std::fmt::Debug for GlyphSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphSet")
            .field("fonts", &self.fonts.len())
            .finish()
    }
}

impl GlyphSet {
    /// Load egui's bundled default fonts
    pub fn from_default_fonts() -> Result<Self> {
        let definitions = egui::FontDefinitions::default();
        let mut fonts = Vec::new();
        for name in FALLBACK_CHAIN {
            let Some(data) = definitions.font_data.get(name) else {
                debug!("Default font {name} not bundled, skipping");
                continue;
            };
            let font = FontArc::try_from_vec(data.font.to_vec())
                .map_err(|err| Error::Font(format!("{name}: {err}")))?;
            fonts.push(font);
        }
        Self::from_fonts(fonts)
    }

    /// Build from explicit fonts, primary first
    pub fn from_fonts(fonts: Vec<FontArc>) -> Result<Self> {
        if fonts.is_empty() {
            return Err(Error::Font("no glyph fonts available".to_owned()));
        }
        Ok(Self { fonts })
    }

    /// First font that has a real glyph for `c`
    fn font_for(&self, c: char) -> Option<&FontArc> {
        self.fonts.iter().find(|font| font.glyph_id(c).0 != 0)
    }

    /// Font and character actually drawn for `c`. Uncovered characters get
    /// the replacement box, zero-width joiners and selectors get nothing.
    fn resolve(&self, c: char) -> Option<(&FontArc, char)> {
        if is_invisible(c) {
            return None;
        }
        if let Some(font) = self.font_for(c) {
            return Some((font, c));
        }
        debug!("No font covers {c:?} (U+{:04X}), drawing a replacement", c as u32);
        REPLACEMENT_CHARS
            .into_iter()
            .find_map(|r| self.font_for(r).map(|font| (font, r)))
    }

    /// Rasterise `text` unrotated at `px` pixels per em.
    ///
    /// Returns `None` when nothing would be visible.
    pub(crate) fn mask(&self, text: &str, px: f32) -> Option<GlyphMask> {
        let scale = PxScale::from(px);
        let primary = self.fonts[0].as_scaled(scale);
        let ascent = primary.ascent();
        let line_height = ascent - primary.descent();

        let mut outlined = Vec::new();
        let mut caret = 0.0f32;
        for c in text.chars() {
            let Some((font, c)) = self.resolve(c) else {
                continue;
            };
            let scaled = font.as_scaled(scale);
            let id = scaled.glyph_id(c);
            let glyph = id.with_scale_and_position(scale, point(caret, ascent));
            caret += scaled.h_advance(id);
            if let Some(glyph) = font.outline_glyph(glyph) {
                outlined.push(glyph);
            }
        }
        if outlined.is_empty() {
            return None;
        }

        let mut min = point(f32::INFINITY, f32::INFINITY);
        let mut max = point(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for glyph in &outlined {
            let bounds = glyph.px_bounds();
            min.x = min.x.min(bounds.min.x);
            min.y = min.y.min(bounds.min.y);
            max.x = max.x.max(bounds.max.x);
            max.y = max.y.max(bounds.max.y);
        }

        let width = (max.x - min.x).ceil() as usize;
        let height = (max.y - min.y).ceil() as usize;
        if width == 0 || height == 0 {
            return None;
        }

        let mut coverage = vec![0.0f32; width * height];
        for glyph in &outlined {
            let bounds = glyph.px_bounds();
            let ox = (bounds.min.x - min.x) as usize;
            let oy = (bounds.min.y - min.y) as usize;
            glyph.draw(|x, y, c| {
                let (x, y) = (ox + x as usize, oy + y as usize);
                if x < width && y < height {
                    let cell = &mut coverage[y * width + x];
                    *cell = (*cell + c).min(1.0);
                }
            });
        }

        // The run is centred on its advance box, like canvas text with
        // centre alignment and a middle baseline.
        let center = Vec2::new(caret / 2.0 - min.x, line_height / 2.0 - min.y);
        Some(GlyphMask {
            width,
            height,
            coverage,
            center,
        })
    }
}

fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}' | '\u{2060}'..='\u{2064}' | '\u{FE00}'..='\u{FE0F}' | '\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fonts_load() {
        let glyphs = GlyphSet::from_default_fonts().unwrap();
        assert!(!glyphs.fonts.is_empty());
    }

    #[test]
    fn test_mask_covers_latin_glyph() {
        let glyphs = GlyphSet::from_default_fonts().unwrap();
        let mask = glyphs.mask("A", 30.0).unwrap();
        assert!(mask.width > 5 && mask.height > 5);
        assert!(mask.coverage.iter().any(|c| *c > 0.5));
        assert!(mask.center.x > 0.0 && mask.center.x < mask.width as f32 + 1.0);
    }

    #[test]
    fn test_blank_text_has_no_mask() {
        let glyphs = GlyphSet::from_default_fonts().unwrap();
        assert!(glyphs.mask("", 30.0).is_none());
        assert!(glyphs.mask(" ", 30.0).is_none());
    }

    #[test]
    fn test_every_default_sticker_has_a_mask() {
        let glyphs = GlyphSet::from_default_fonts().unwrap();
        for sticker in crate::config::Config::default().stickers {
            let mask = glyphs.mask(&sticker, 30.0);
            assert!(
                mask.is_some_and(|m| m.coverage.iter().any(|c| *c > 0.5)),
                "{sticker} has no ink"
            );
        }
    }

    #[test]
    fn test_uncovered_char_draws_replacement() {
        let glyphs = GlyphSet::from_default_fonts().unwrap();
        // Private use area, in none of the bundled fonts
        let missing = glyphs.mask("\u{10FFFD}", 30.0).unwrap();
        let r = REPLACEMENT_CHARS
            .into_iter()
            .find(|r| glyphs.font_for(*r).is_some())
            .unwrap();
        let replacement = glyphs.mask(&r.to_string(), 30.0).unwrap();
        assert_eq!((missing.width, missing.height), (replacement.width, replacement.height));
    }

    #[test]
    fn test_zero_width_chars_are_skipped() {
        let glyphs = GlyphSet::from_default_fonts().unwrap();
        let plain = glyphs.mask("A", 30.0).unwrap();
        let joined = glyphs.mask("A\u{FE0F}\u{200D}", 30.0).unwrap();
        assert_eq!(plain.width, joined.width);
        assert_eq!(plain.center, joined.center);
    }

    #[test]
    fn test_sample_outside_is_zero() {
        let mask = GlyphMask {
            width: 2,
            height: 2,
            coverage: vec![1.0; 4],
            center: Vec2::splat(1.0),
        };
        assert_eq!(mask.sample(-5.0, -5.0), 0.0);
        assert!((mask.sample(1.0, 1.0) - 1.0).abs() < 1e-5);
    }
}
