//! 1-bit page-organized frame buffer
//!
//! Layout matches the SSD1306/SH1106 GDDRAM: 8 pages of 128 columns, each
//! byte a vertical strip of 8 pixels with bit 0 on top.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Panel width in pixels
pub const WIDTH: usize = 128;
/// Panel height in pixels
pub const HEIGHT: usize = 64;
/// Number of 8-pixel pages
pub const PAGES: usize = HEIGHT / 8;

pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Raw bytes of one page
    pub fn page(&self, page: usize) -> &[u8; WIDTH] {
        &self.pages[page]
    }

    /// Whether the pixel at (x, y) is lit; off-panel reads as unlit
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let bit = 1 << (y % 8);
        let byte = &mut self.pages[y / 8][x];
        if on {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }

    /// Whether anything is lit in the rows `y0..y1`
    pub fn any_lit_in_rows(&self, y0: usize, y1: usize) -> bool {
        (y0..y1.min(HEIGHT)).any(|y| (0..WIDTH).any(|x| self.pixel(x, y)))
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                self.set_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_bit_layout() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(3, 9, true);
        assert!(fb.pixel(3, 9));
        // Row 9 is bit 1 of page 1
        assert_eq!(fb.page(1)[3], 0b10);

        fb.set_pixel(3, 9, false);
        assert!(!fb.pixel(3, 9));
    }

    #[test]
    fn test_off_panel_ignored() {
        let mut fb = FrameBuffer::new();
        let pixels = [
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(0, 64), BinaryColor::On),
            Pixel(Point::new(128, 0), BinaryColor::On),
        ];
        fb.draw_iter(pixels).unwrap();
        assert!(!fb.any_lit_in_rows(0, HEIGHT));
    }
}
