use nalgebra::Vector3;

use crate::color::Color;
use crate::lighting::get_lighting;
use crate::lights::PointLight;

/// Fraction of each light channel a surface reflects for one lighting term.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Reflectance {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Reflectance {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Reflectance { red, green, blue }
    }

    pub fn repeat(value: f64) -> Self {
        Reflectance::new(value, value, value)
    }

    pub fn from_vector(vector: Vector3<f64>) -> Self {
        Reflectance::new(vector.x, vector.y, vector.z)
    }
}

/// Reflection constants of a surface, one triple per lighting term.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub ambient: Reflectance,
    pub diffuse: Reflectance,
    pub specular: Reflectance,
}

impl Material {
    pub fn new(ambient: Reflectance, diffuse: Reflectance, specular: Reflectance) -> Self {
        Material {
            ambient,
            diffuse,
            specular,
        }
    }

    pub fn shade(
        &self,
        normal: Vector3<f64>,
        view: Vector3<f64>,
        ambient_light: Color,
        light: &PointLight,
    ) -> Color {
        get_lighting(
            normal,
            view,
            ambient_light,
            light,
            &self.ambient,
            &self.diffuse,
            &self.specular,
        )
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::new(
            Reflectance::repeat(0.1),
            Reflectance::repeat(0.5),
            Reflectance::repeat(0.5),
        )
    }
}
