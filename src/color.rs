use std::ops::Add;

use nalgebra::Vector3;

/// Highest intensity a channel may hold after clamping.
pub const MAX_INTENSITY: f64 = 255.0;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Color { red, green, blue }
    }

    pub fn black() -> Self {
        Color::new(0.0, 0.0, 0.0)
    }

    pub fn repeat(value: f64) -> Self {
        Color::new(value, value, value)
    }

    pub fn from_vector(vector: Vector3<f64>) -> Self {
        Color::new(vector.x, vector.y, vector.z)
    }

    pub fn limited(mut self) -> Self {
        limit_color(&mut self);
        self
    }

    /// 8-bit display value. Channels saturate to 0..=255, fractions are
    /// truncated (127.9 gives 127) and NaN gives 0. The lighting model itself
    /// never applies a lower bound.
    pub fn to_rgb8(self) -> [u8; 3] {
        [self.red as u8, self.green as u8, self.blue as u8]
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        Color {
            red: self.red + other.red,
            green: self.green + other.green,
            blue: self.blue + other.blue,
        }
    }
}

/// Clamps every channel above 255 down to 255, in place.
pub fn limit_color(color: &mut Color) {
    if color.red > MAX_INTENSITY {
        color.red = MAX_INTENSITY;
    }
    if color.green > MAX_INTENSITY {
        color.green = MAX_INTENSITY;
    }
    if color.blue > MAX_INTENSITY {
        color.blue = MAX_INTENSITY;
    }
}
