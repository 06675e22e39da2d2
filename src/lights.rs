use nalgebra::Vector3;

use crate::color::Color;
use crate::helpers::normalize;

/// A point light. `location` is taken as the direction from the shaded point
/// towards the light, it is not a world position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub location: Vector3<f64>,
    pub color: Color,
}

impl PointLight {
    pub fn new(location: Vector3<f64>, color: Color) -> Self {
        PointLight { location, color }
    }

    /// Copy of this light with a unit length location.
    pub fn normalized(&self) -> Self {
        PointLight {
            location: normalize(self.location),
            color: self.color,
        }
    }
}
