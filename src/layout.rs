//! Greedy line wrapping
//!
//! Single forward pass over measured tokens: no look-ahead, no hyphenation,
//! no justification. Tokens wider than the area are placed alone on their
//! line rather than clipped or split.

use crate::backend::TextMeasure;
use crate::token_store::TokenStore;

/// Gap added between consecutive lines
pub const LINE_SPACING: f32 = 2.0;

/// Inputs to [`layout_tokens`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Available width; a token fits when `x + width < area_width`
    pub area_width: f32,
    /// Extra advance after every placed token
    pub space_dx: f32,
    /// Minimum line height
    pub line_dy: f32,
}

/// Summary of a finished layout
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutStats {
    /// Lines started, counting the first one
    pub lines: usize,
    /// Bottom edge of the lowest placed token
    pub height: f32,
}

/// Fill every token's width and height from `measure`.
///
/// Newline tokens are left at zero size.
pub fn measure_tokens(store: &mut TokenStore<'_>, measure: &mut dyn TextMeasure) {
    for token in store.iter_mut() {
        if token.is_newline() {
            continue;
        }
        let size = measure.measure(token.text);
        token.bounds.width = size.width;
        token.bounds.height = size.height;
    }
}

/// Assign every token's position; sizes are left untouched
pub fn layout_tokens(store: &mut TokenStore<'_>, params: LayoutParams) -> LayoutStats {
    let LayoutParams {
        area_width,
        space_dx,
        line_dy,
    } = params;

    let mut x = 0.0f32;
    let mut y = 0.0f32;
    // Tallest token on the current line
    let mut max_dy = line_dy;
    let mut stats = LayoutStats {
        lines: 1,
        height: 0.0,
    };

    for token in store.iter_mut() {
        if token.is_newline() {
            x = 0.0;
            y += max_dy + LINE_SPACING;
            stats.lines += 1;
            continue;
        }

        let bb = &mut token.bounds;
        max_dy = max_dy.max(bb.height);

        if x + bb.width < area_width {
            bb.x = x;
            bb.y = y;
            x += bb.width + space_dx;
        } else if x == 0.0 {
            // Alone on its line and still too wide: keep it, next token wraps
            bb.x = 0.0;
            bb.y = y;
            y += max_dy + LINE_SPACING;
            stats.lines += 1;
        } else {
            y += max_dy + LINE_SPACING;
            max_dy = bb.height;
            bb.x = 0.0;
            bb.y = y;
            x = bb.width + space_dx;
            stats.lines += 1;
        }

        stats.height = stats.height.max(bb.bottom());
    }

    log::debug!(
        "Laid out {} tokens into {} lines ({:.1} tall) at width {:.1}",
        store.len(),
        stats.lines,
        stats.height,
        area_width
    );
    stats
}
