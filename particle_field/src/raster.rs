//! Off-screen text rasterization.
//!
//! Text is drawn bright-on-dark into an 8-bit grayscale bitmap, centred,
//! with each font dot expanded to a `dot_px` square.

use thiserror::Error;

use crate::font;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("cannot draw onto a {width}×{height} surface")]
    EmptySurface { width: usize, height: usize },

    #[error("text needs {needed_w}×{needed_h} px but the surface is {width}×{height}")]
    TextTooLarge { needed_w: usize, needed_h: usize, width: usize, height: usize },
}

/// Grayscale bitmap, row-major, row 0 at the top.
#[derive(Clone, Debug)]
pub struct Bitmap {
    width:  usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// An all-black surface.
    pub fn new(width: usize, height: usize) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptySurface { width, height });
        }
        Ok(Bitmap { width, height, pixels: vec![0; width * height] })
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height { self.pixels[y * self.width + x] } else { 0 }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, value: u8) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.pixels[row * self.width + col] = value;
            }
        }
    }
}

/// Draw `text` centred on a fresh `width`×`height` bitmap.
pub fn render_text(text: &str, dot_px: usize, width: usize, height: usize) -> Result<Bitmap, RasterError> {
    let mut bmp = Bitmap::new(width, height)?;

    let needed_w = font::text_width(text) * dot_px;
    let needed_h = font::GLYPH_H * dot_px;
    if needed_w > width || needed_h > height {
        return Err(RasterError::TextTooLarge { needed_w, needed_h, width, height });
    }

    let x0 = (width - needed_w) / 2;
    let y0 = (height - needed_h) / 2;

    for (i, ch) in text.chars().enumerate() {
        let cx = x0 + i * font::ADVANCE * dot_px;
        for row in 0..font::GLYPH_H {
            for col in 0..font::GLYPH_W {
                if font::dot(ch, col, row) {
                    bmp.fill_rect(cx + col * dot_px, y0 + row * dot_px, dot_px, dot_px, u8::MAX);
                }
            }
        }
    }
    Ok(bmp)
}
