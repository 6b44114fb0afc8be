//! fontdue backend - the fast one
//!
//! Advances and glyph bitmaps are computed once per character and cached.
//! Ink is composited opaquely, so redrawing without a clear is harmless.

use super::{TextDraw, TextMeasure};
use crate::coordinates::{LayoutRect, LayoutSize};
use crate::font::LoadedFont;
use crate::surface::Surface;
use ahash::HashMap;
use std::sync::Arc;

/// Line height handed to layout by this backend.
///
/// Fixed rather than taken from the font's line metrics.
pub const FALLBACK_LINE_HEIGHT: f32 = 12.0;

fn line_metrics(font: &fontdue::Font, font_size: f32) -> (f32, f32) {
    match font.horizontal_line_metrics(font_size) {
        Some(m) => (m.ascent, m.new_line_size),
        None => {
            log::warn!("Font has no horizontal line metrics, using font size");
            (font_size, font_size)
        }
    }
}

/// Sum of cached per-character advances plus pair kerning
pub struct FontdueMeasure {
    font: Arc<fontdue::Font>,
    font_size: f32,
    /// Height of every measured span
    line_height: f32,
    advances: HashMap<char, f32>,
}

impl FontdueMeasure {
    pub fn new(font: &LoadedFont, font_size: f32) -> Self {
        let font = font.fontdue();
        let (_, line_height) = line_metrics(&font, font_size);
        Self {
            font,
            font_size,
            line_height,
            advances: HashMap::default(),
        }
    }

    fn advance(&mut self, ch: char) -> f32 {
        let (font, size) = (&self.font, self.font_size);
        *self
            .advances
            .entry(ch)
            .or_insert_with(|| font.metrics(ch, size).advance_width)
    }
}

impl TextMeasure for FontdueMeasure {
    fn measure(&mut self, text: &str) -> LayoutSize {
        let mut width = 0.0;
        let mut prev = None;
        for ch in text.chars() {
            width += self.advance(ch);
            if let Some(left) = prev {
                width += self
                    .font
                    .horizontal_kern(left, ch, self.font_size)
                    .unwrap_or(0.0);
            }
            prev = Some(ch);
        }
        LayoutSize::new(width, self.line_height)
    }

    fn reference_line_height(&self) -> f32 {
        FALLBACK_LINE_HEIGHT
    }
}

struct CachedGlyph {
    metrics: fontdue::Metrics,
    coverage: Vec<u8>,
}

/// Cached glyph bitmaps, composited opaquely
pub struct FontdueDraw {
    font: Arc<fontdue::Font>,
    font_size: f32,
    ascent: f32,
    glyphs: HashMap<char, CachedGlyph>,
}

impl FontdueDraw {
    pub fn new(font: &LoadedFont, font_size: f32) -> Self {
        let font = font.fontdue();
        let (ascent, _) = line_metrics(&font, font_size);
        Self {
            font,
            font_size,
            ascent,
            glyphs: HashMap::default(),
        }
    }

    /// Number of distinct glyphs rasterized so far
    pub fn cached_glyphs(&self) -> usize {
        self.glyphs.len()
    }
}

impl TextDraw for FontdueDraw {
    fn draw(&mut self, surface: &mut Surface, text: &str, bounds: LayoutRect) {
        let baseline = bounds.y + self.ascent;
        let mut pen = bounds.x;
        let mut prev = None;

        for ch in text.chars() {
            if let Some(left) = prev {
                pen += self
                    .font
                    .horizontal_kern(left, ch, self.font_size)
                    .unwrap_or(0.0);
            }
            prev = Some(ch);

            let (font, size) = (&self.font, self.font_size);
            let glyph = self.glyphs.entry(ch).or_insert_with(|| {
                let (metrics, coverage) = font.rasterize(ch, size);
                CachedGlyph { metrics, coverage }
            });
            let m = glyph.metrics;

            if !ch.is_control() && m.width > 0 && m.height > 0 {
                let x = (pen + m.xmin as f32).round() as i32;
                let y = (baseline - m.height as f32 - m.ymin as f32).round() as i32;
                surface.blit_coverage(
                    x,
                    y,
                    m.width as u32,
                    m.height as u32,
                    &glyph.coverage,
                    Surface::composite_min,
                );
            }
            pen += m.advance_width;
        }
    }

    fn accumulates(&self) -> bool {
        false
    }
}
