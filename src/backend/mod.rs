//! Measurement and drawing backends
//!
//! Layout only talks to [`TextMeasure`], drawing only to [`TextDraw`]. Each
//! rendering technology is a flat struct implementing one or both, picked at
//! construction time through [`BackendKind`].

mod fontdue_backend;
mod swash_backend;

pub use fontdue_backend::{FontdueDraw, FontdueMeasure, FALLBACK_LINE_HEIGHT};
pub use swash_backend::{SwashDraw, SwashMeasure};

use crate::coordinates::{LayoutRect, LayoutSize};
use crate::font::LoadedFont;
use crate::surface::Surface;
use std::fmt;

// === Capabilities ===

/// Computes the rendered size of a text span
pub trait TextMeasure {
    /// Bounding box size of `text`; deterministic for a fixed backend state
    fn measure(&mut self, text: &str) -> LayoutSize;

    /// Nominal line height used for vertical advance
    fn reference_line_height(&self) -> f32;
}

/// Renders a text span into a surface
pub trait TextDraw {
    /// Draw `text` with its top-left corner at `bounds`' origin
    fn draw(&mut self, surface: &mut Surface, text: &str, bounds: LayoutRect);

    /// True when drawing the same text twice without a clear changes the
    /// output (antialiased blending over what is already there)
    fn accumulates(&self) -> bool;
}

// === Selection ===

/// The interchangeable backends, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BackendKind {
    /// Cached metrics and glyphs, opaque compositing
    Fontdue,
    /// Full shaping and rasterization on every call, alpha blending
    Swash,
}

impl BackendKind {
    pub const ALL: [BackendKind; 2] = [BackendKind::Fontdue, BackendKind::Swash];

    pub fn label(self) -> &'static str {
        match self {
            BackendKind::Fontdue => "fontdue",
            BackendKind::Swash => "swash",
        }
    }

    pub fn measurer(self, font: &LoadedFont, font_size: f32) -> Box<dyn TextMeasure> {
        match self {
            BackendKind::Fontdue => Box::new(FontdueMeasure::new(font, font_size)),
            BackendKind::Swash => Box::new(SwashMeasure::new(font, font_size)),
        }
    }

    pub fn drawer(self, font: &LoadedFont, font_size: f32) -> Box<dyn TextDraw> {
        match self {
            BackendKind::Fontdue => Box::new(FontdueDraw::new(font, font_size)),
            BackendKind::Swash => Box::new(SwashDraw::new(font, font_size)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// === Font-free measurer ===

/// Fixed advance per character, no font needed
///
/// Handy wherever real glyph metrics don't matter, e.g. exercising the
/// layout algorithm or benchmarking it in isolation.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicMeasure {
    pub char_width: f32,
    pub line_height: f32,
}

impl HeuristicMeasure {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

impl Default for HeuristicMeasure {
    fn default() -> Self {
        // ~0.6em advance at 14px
        Self::new(8.4, 14.0)
    }
}

impl TextMeasure for HeuristicMeasure {
    fn measure(&mut self, text: &str) -> LayoutSize {
        LayoutSize::new(
            self.char_width * text.chars().count() as f32,
            self.line_height,
        )
    }

    fn reference_line_height(&self) -> f32 {
        self.line_height
    }
}
