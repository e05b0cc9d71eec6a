//! Pixel buffer and its PPM / image exports

use image::RgbImage;

use crate::utils::{get_pixel, scale_color};
use crate::Color;

/// Longest line allowed in PPM output
const PPM_LINE_WIDTH: usize = 70;

/// Row-major grid of colours, `(0, 0)` at the top left
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}
impl Canvas {
    /// A black canvas
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::zeros(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// # Panics
    /// If (`x`, `y`) is outside the canvas
    pub fn pixel_at(&self, x: usize, y: usize) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// # Panics
    /// If (`x`, `y`) is outside the canvas
    pub fn write_pixel(&mut self, x: usize, y: usize, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} canvas",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Plain PPM (P3) text, channels clamped to 0-255 and lines wrapped at 70 characters
    pub fn to_ppm(&self) -> String {
        let mut ppm = format!("P3\n{} {}\n255\n", self.width, self.height);
        for row in self.pixels.chunks(self.width.max(1)) {
            let mut line = String::new();
            for value in row.iter().flat_map(|c| c.iter()).map(|&v| scale_color(v)) {
                let value = value.to_string();
                if !line.is_empty() && line.len() + 1 + value.len() > PPM_LINE_WIDTH {
                    ppm.push_str(&line);
                    ppm.push('\n');
                    line.clear();
                }
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&value);
            }
            ppm.push_str(&line);
            ppm.push('\n');
        }
        ppm
    }

    /// 8-bit RGB image for saving through `image`
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            get_pixel(&self.pixel_at(x as usize, y as usize))
        })
    }
}
