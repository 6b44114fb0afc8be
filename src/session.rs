//! One backend rendering one text into a surface, repaint after repaint
//!
//! The layout is built on the first paint and reused afterwards. Draw passes
//! are timed on the first paint only; later paints just draw.

use crate::backend::{BackendKind, TextDraw, TextMeasure};
use crate::config::AppConfig;
use crate::error::Result;
use crate::font::LoadedFont;
use crate::layout::{layout_tokens, measure_tokens, LayoutParams, LayoutStats};
use crate::surface::{Surface, PAPER};
use crate::timing::{draw_tokens, Harness, Operation, TimingReport, TimingSamples};
use crate::token_store::{TokenStore, DEFAULT_CAPACITY};

/// Gray used to outline token bounding boxes
pub const DEBUG_BOX_INK: u8 = 0x80;

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub font_size: f32,
    pub harness: Harness,
    pub token_capacity: usize,
    pub debug_boxes: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            harness: Harness::default(),
            token_capacity: DEFAULT_CAPACITY,
            debug_boxes: false,
        }
    }
}

impl From<&AppConfig> for SessionOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            font_size: config.font.size,
            harness: Harness::new(config.bench.repeat_count),
            token_capacity: config.bench.token_capacity,
            debug_boxes: config.development.debug_boxes,
        }
    }
}

/// Tokens with sizes and positions filled in
#[derive(Debug)]
pub struct TextLayout<'a> {
    pub store: TokenStore<'a>,
    pub stats: LayoutStats,
    pub params: LayoutParams,
}

/// Tokenize, time `repeat_count` measure passes (one untimed pass if zero),
/// then lay out at `area_width`
pub fn build_layout<'a>(
    text: &'a str,
    measure: &mut dyn TextMeasure,
    area_width: f32,
    harness: &Harness,
    capacity: usize,
) -> Result<(TextLayout<'a>, TimingSamples)> {
    let mut store = TokenStore::from_text(text, capacity)?;
    let samples = harness.time_measure(&mut store, measure);
    if samples.is_empty() {
        measure_tokens(&mut store, measure);
    }

    let params = LayoutParams {
        area_width,
        space_dx: measure.measure(" ").width,
        line_dy: measure.reference_line_height(),
    };
    let stats = layout_tokens(&mut store, params);

    Ok((
        TextLayout {
            store,
            stats,
            params,
        },
        samples,
    ))
}

pub struct RenderSession<'a> {
    kind: BackendKind,
    text: &'a str,
    options: SessionOptions,
    layout: Option<TextLayout<'a>>,
    draw_timed: bool,
}

impl<'a> RenderSession<'a> {
    pub fn new(kind: BackendKind, text: &'a str, options: SessionOptions) -> Self {
        Self {
            kind,
            text,
            options,
            layout: None,
            draw_timed: false,
        }
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// The cached layout, once the first paint has built it
    pub fn layout(&self) -> Option<&TextLayout<'a>> {
        self.layout.as_ref()
    }

    /// Redraw the whole text into `surface` with this session's backend.
    ///
    /// The first call lays the text out at the surface's width; the surface
    /// size is not looked at again after that.
    pub fn paint(
        &mut self,
        surface: &mut Surface,
        font: &LoadedFont,
        report: &mut TimingReport,
    ) -> Result<()> {
        let mut measure = self.kind.measurer(font, self.options.font_size);
        let mut draw = self.kind.drawer(font, self.options.font_size);
        self.paint_with(surface, measure.as_mut(), draw.as_mut(), report)
    }

    /// [`paint`](Self::paint) with explicit backends; `measure` is only used
    /// while no layout is cached
    pub fn paint_with(
        &mut self,
        surface: &mut Surface,
        measure: &mut dyn TextMeasure,
        draw: &mut dyn TextDraw,
        report: &mut TimingReport,
    ) -> Result<()> {
        let layout = match self.layout.take() {
            Some(layout) => layout,
            None => {
                let (layout, samples) = build_layout(
                    self.text,
                    measure,
                    surface.width() as f32,
                    &self.options.harness,
                    self.options.token_capacity,
                )?;
                log::info!(
                    "{}: {} tokens, {} lines",
                    self.kind,
                    layout.store.len(),
                    layout.stats.lines
                );
                report.insert(Operation::Measure, self.kind, samples);
                layout
            }
        };
        let layout = self.layout.insert(layout);

        surface.fill(PAPER);
        let mut drawn = false;
        if !self.draw_timed {
            let samples = self.options.harness.time_draw(&layout.store, draw, surface);
            drawn = !samples.is_empty();
            report.insert(Operation::Draw, self.kind, samples);
            self.draw_timed = true;
        }
        // Also covers a harness configured for zero timed runs
        if !drawn {
            draw_tokens(&layout.store, draw, surface);
        }

        if self.options.debug_boxes {
            for token in layout.store.drawable() {
                surface.stroke_rect(token.bounds, DEBUG_BOX_INK);
            }
        }
        Ok(())
    }
}
