//! Coordinate types shared by measurement, layout and drawing
//!
//! Two spaces:
//! 1. Layout space: floating point units as reported by the measuring backend
//! 2. Surface space: integer pixels of the drawing target
//!
//! Backends measure in the same units the surface draws in, so converting
//! between the two is a plain rounding step.

// === Layout Space ===

/// Position in layout space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutPos {
    pub x: f32,
    pub y: f32,
}

impl LayoutPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size in layout space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutSize {
    pub width: f32,
    pub height: f32,
}

impl LayoutSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Rectangle in layout space - a token's bounding box
///
/// Position stays zero until layout assigns it, size stays zero until a
/// backend measures the token.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> LayoutPos {
        LayoutPos::new(self.x, self.y)
    }

    pub fn size(&self) -> LayoutSize {
        LayoutSize::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Snap to whole surface pixels (left, top, right, bottom)
    pub fn to_pixels(&self) -> PixelRect {
        PixelRect {
            left: self.x.round() as i32,
            top: self.y.round() as i32,
            right: self.right().round() as i32,
            bottom: self.bottom().round() as i32,
        }
    }
}

// === Surface Space ===

/// Pixel-aligned rectangle on a surface, right/bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }
}

/// Size of a surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = LayoutRect::new(10.0, 5.0, 20.0, 12.0);
        assert_eq!(r.right(), 30.0);
        assert_eq!(r.bottom(), 17.0);
        assert_eq!(r.origin(), LayoutPos::new(10.0, 5.0));
        assert_eq!(r.size(), LayoutSize::new(20.0, 12.0));
    }

    #[test]
    fn test_to_pixels_rounds() {
        let r = LayoutRect::new(0.4, 1.6, 10.2, 3.0);
        assert_eq!(
            r.to_pixels(),
            PixelRect {
                left: 0,
                top: 2,
                right: 11,
                bottom: 5
            }
        );
        assert!(LayoutRect::default().to_pixels().is_empty());
    }
}
