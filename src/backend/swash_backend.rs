//! swash backend - the slow, high quality one
//!
//! Every call shapes the span (kerning, ligatures) and every draw rasterizes
//! hinted outlines from scratch. Coverage is alpha-blended over what is
//! already on the surface, so repeated draws darken antialiased edges.

use super::{TextDraw, TextMeasure};
use crate::coordinates::{LayoutRect, LayoutSize};
use crate::font::{LoadedFont, SwashFace};
use crate::surface::Surface;
use swash::scale::{Render, ScaleContext, Source};
use swash::shape::ShapeContext;
use swash::zeno::Format;
use swash::FontRef;

/// Font-level metrics scaled to pixels
#[derive(Clone, Copy, Debug)]
struct ScaledMetrics {
    ascent: f32,
    descent: f32,
    leading: f32,
}

impl ScaledMetrics {
    fn new(font: FontRef<'_>, font_size: f32) -> Self {
        let metrics = font.metrics(&[]);
        let scale = font_size / metrics.units_per_em as f32;
        Self {
            ascent: metrics.ascent * scale,
            descent: metrics.descent.abs() * scale,
            leading: metrics.leading * scale,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ShapedGlyph {
    id: u16,
    x: f32,
    y: f32,
    advance: f32,
}

fn shape(
    context: &mut ShapeContext,
    font: FontRef<'_>,
    font_size: f32,
    text: &str,
    mut each: impl FnMut(ShapedGlyph),
) {
    let mut shaper = context.builder(font).size(font_size).build();
    shaper.add_str(text);
    shaper.shape_with(|cluster| {
        for glyph in cluster.glyphs {
            each(ShapedGlyph {
                id: glyph.id,
                x: glyph.x,
                y: glyph.y,
                advance: glyph.advance,
            });
        }
    });
}

/// Shaped advance width, ascent + descent height
pub struct SwashMeasure {
    face: SwashFace,
    font_size: f32,
    metrics: ScaledMetrics,
    context: ShapeContext,
}

impl SwashMeasure {
    pub fn new(font: &LoadedFont, font_size: f32) -> Self {
        let face = SwashFace::new(font);
        let metrics = ScaledMetrics::new(face.font_ref(), font_size);
        Self {
            face,
            font_size,
            metrics,
            context: ShapeContext::new(),
        }
    }
}

impl TextMeasure for SwashMeasure {
    fn measure(&mut self, text: &str) -> LayoutSize {
        let mut width = 0.0;
        shape(
            &mut self.context,
            self.face.font_ref(),
            self.font_size,
            text,
            |g| width += g.advance,
        );
        LayoutSize::new(width, self.metrics.ascent + self.metrics.descent)
    }

    fn reference_line_height(&self) -> f32 {
        self.metrics.ascent + self.metrics.descent + self.metrics.leading
    }
}

/// Shapes and rasterizes on every call, blends coverage over the surface
pub struct SwashDraw {
    face: SwashFace,
    font_size: f32,
    ascent: f32,
    shaper: ShapeContext,
    scaler: ScaleContext,
    glyphs: Vec<ShapedGlyph>,
}

impl SwashDraw {
    pub fn new(font: &LoadedFont, font_size: f32) -> Self {
        let face = SwashFace::new(font);
        let ascent = ScaledMetrics::new(face.font_ref(), font_size).ascent;
        Self {
            face,
            font_size,
            ascent,
            shaper: ShapeContext::new(),
            scaler: ScaleContext::new(),
            glyphs: Vec::new(),
        }
    }
}

impl TextDraw for SwashDraw {
    fn draw(&mut self, surface: &mut Surface, text: &str, bounds: LayoutRect) {
        let font = self.face.font_ref();

        self.glyphs.clear();
        let glyphs = &mut self.glyphs;
        shape(&mut self.shaper, font, self.font_size, text, |g| glyphs.push(g));

        let mut scaler = self
            .scaler
            .builder(font)
            .size(self.font_size)
            .hint(true)
            .build();

        let baseline = bounds.y + self.ascent;
        let mut pen = bounds.x;
        for glyph in &self.glyphs {
            let image = Render::new(&[Source::Outline])
                .format(Format::Alpha)
                .render(&mut scaler, glyph.id);

            if let Some(image) = image {
                let p = image.placement;
                let x = (pen + glyph.x).round() as i32 + p.left;
                let y = (baseline - glyph.y).round() as i32 - p.top;
                surface.blit_coverage(x, y, p.width, p.height, &image.data, Surface::blend_over);
            }
            pen += glyph.advance;
        }
    }

    fn accumulates(&self) -> bool {
        true
    }
}
