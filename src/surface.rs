//! In-memory drawing target
//!
//! 8-bit grayscale, 255 = paper, 0 = full ink. Stands in for the window's
//! device context so drawing cost can be measured without a display.

use crate::coordinates::{LayoutRect, PhysicalSize};
use crate::error::{Error, Result};
use std::io::Write;
use std::path::Path;

pub const PAPER: u8 = 0xFF;

pub struct Surface {
    size: PhysicalSize,
    pixels: Vec<u8>,
}

impl Surface {
    /// Blank (paper-colored) surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: PhysicalSize { width, height },
            pixels: vec![PAPER; width as usize * height as usize],
        }
    }

    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(self.pixels[y as usize * self.size.width as usize + x as usize])
    }

    /// Fill the whole surface with one value (background clear)
    pub fn fill(&mut self, value: u8) {
        self.pixels.fill(value);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.size.width || y as u32 >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    /// Opaque ink: the darker of the existing pixel and the glyph wins.
    /// Drawing the same coverage twice gives the same result.
    pub fn composite_min(&mut self, x: i32, y: i32, coverage: u8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = self.pixels[i].min(PAPER - coverage);
        }
    }

    /// Alpha-blend black ink over the existing pixel.
    /// Partial coverage darkens further on every repeated draw.
    pub fn blend_over(&mut self, x: i32, y: i32, coverage: u8) {
        if coverage == 0 {
            return;
        }
        if let Some(i) = self.index(x, y) {
            let dst = self.pixels[i] as u32;
            let keep = (PAPER - coverage) as u32;
            self.pixels[i] = ((dst * keep + 127) / 255) as u8;
        }
    }

    /// Place a coverage bitmap with its top-left at (x, y)
    pub fn blit_coverage(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        coverage: &[u8],
        op: fn(&mut Surface, i32, i32, u8),
    ) {
        for row in 0..height as usize {
            for col in 0..width as usize {
                let Some(&c) = coverage.get(row * width as usize + col) else {
                    return;
                };
                if c != 0 {
                    op(self, x + col as i32, y + row as i32, c);
                }
            }
        }
    }

    /// 1px outline of a layout rect, clipped to the surface
    pub fn stroke_rect(&mut self, rect: LayoutRect, value: u8) {
        let r = rect.to_pixels();
        if r.is_empty() {
            return;
        }
        for x in r.left..r.right {
            self.set(x, r.top, value);
            self.set(x, r.bottom - 1, value);
        }
        for y in r.top..r.bottom {
            self.set(r.left, y, value);
            self.set(r.right - 1, y, value);
        }
    }

    fn set(&mut self, x: i32, y: i32, value: u8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = value;
        }
    }

    /// Total ink on the surface; grows when output accumulates
    pub fn ink(&self) -> u64 {
        self.pixels.iter().map(|&p| (PAPER - p) as u64).sum()
    }

    /// Write as a binary PGM image
    pub fn write_pgm(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
        write!(file, "P5\n{} {}\n255\n", self.size.width, self.size.height)
            .and_then(|_| file.write_all(&self.pixels))
            .map_err(|e| Error::io(path, e))?;
        log::debug!("Wrote {}x{} surface to {}", self.size.width, self.size.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank() {
        let surface = Surface::new(4, 3);
        assert_eq!(surface.pixels().len(), 12);
        assert_eq!(surface.ink(), 0);
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn test_composite_min_is_idempotent() {
        let mut surface = Surface::new(2, 2);
        surface.composite_min(0, 0, 128);
        let once = surface.ink();
        surface.composite_min(0, 0, 128);
        assert_eq!(surface.ink(), once);
        assert_eq!(surface.pixel(0, 0), Some(127));
    }

    #[test]
    fn test_blend_over_accumulates() {
        let mut surface = Surface::new(2, 2);
        surface.blend_over(1, 1, 128);
        let once = surface.ink();
        surface.blend_over(1, 1, 128);
        assert!(surface.ink() > once);
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut surface = Surface::new(2, 2);
        surface.composite_min(-1, 0, 255);
        surface.blend_over(0, 5, 255);
        assert_eq!(surface.ink(), 0);
    }

    #[test]
    fn test_fill_and_stroke() {
        let mut surface = Surface::new(10, 10);
        surface.stroke_rect(LayoutRect::new(1.0, 1.0, 4.0, 3.0), 0);
        assert_eq!(surface.pixel(1, 1), Some(0));
        assert_eq!(surface.pixel(4, 3), Some(0));
        assert_eq!(surface.pixel(2, 2), Some(PAPER));

        surface.fill(PAPER);
        assert_eq!(surface.ink(), 0);
    }

    #[test]
    fn test_blit_coverage() {
        let mut surface = Surface::new(4, 4);
        surface.blit_coverage(1, 1, 2, 2, &[255, 0, 0, 255], Surface::composite_min);
        assert_eq!(surface.pixel(1, 1), Some(0));
        assert_eq!(surface.pixel(2, 1), Some(PAPER));
        assert_eq!(surface.pixel(2, 2), Some(0));
    }
}
