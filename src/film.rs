use std::path::Path;

use image::{ImageBuffer, ImageResult, Rgb};
use nalgebra::Vector2;

use crate::color::Color;

/// 8-bit RGB target for shaded colors.
pub struct Film {
    pub image_size: Vector2<u32>,
    pub image_buffer: ImageBuffer<Rgb<u8>, Vec<u8>>,
}

impl Film {
    pub fn new(image_size: Vector2<u32>) -> Film {
        Film {
            image_size,
            image_buffer: ImageBuffer::new(image_size.x, image_size.y),
        }
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.image_buffer.put_pixel(x, y, Rgb(color.to_rgb8()));
    }

    pub fn write_row(&mut self, y: u32, row: &[Color]) {
        for (x, color) in row.iter().enumerate() {
            self.set_pixel(x as u32, y, *color);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image_buffer.get_pixel(x, y).0
    }

    pub fn save(&self, path: &Path) -> ImageResult<()> {
        self.image_buffer.save(path)
    }
}
