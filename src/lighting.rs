//! Phong illumination: ambient, diffuse and specular terms for a single point
//! light, summed and clamped into one color.
//!
//! Every function takes its vectors by value and normalizes copies, the
//! caller's normal and light are never modified.

use nalgebra::Vector3;

use crate::color::{limit_color, Color};
use crate::error::LightingError;
use crate::helpers::{dot_product, normalize, try_normalize, vector_reflect};
use crate::lights::PointLight;
use crate::materials::Reflectance;

/// Fixed highlight falloff exponent.
pub const SPECULAR_EXPONENT: f64 = 2.5;

/// Color of one shaded point lit by `light`.
pub fn get_lighting(
    normal: Vector3<f64>,
    view: Vector3<f64>,
    ambient_light: Color,
    light: &PointLight,
    ambient_reflect: &Reflectance,
    diffuse_reflect: &Reflectance,
    specular_reflect: &Reflectance,
) -> Color {
    let a = calculate_ambient(ambient_light, ambient_reflect);
    let d = calculate_diffuse(light, diffuse_reflect, normal);
    // specular normalizes again, on top of the diffuse pass
    let s = calculate_specular(&light.normalized(), specular_reflect, view, normalize(normal));

    let mut i = a + d + s;
    limit_color(&mut i);

    i
}

/// Same as [`get_lighting`] but rejects a zero length normal or light location
/// instead of letting NaN reach the color.
pub fn try_get_lighting(
    normal: Vector3<f64>,
    view: Vector3<f64>,
    ambient_light: Color,
    light: &PointLight,
    ambient_reflect: &Reflectance,
    diffuse_reflect: &Reflectance,
    specular_reflect: &Reflectance,
) -> Result<Color, LightingError> {
    try_normalize(normal)?;
    try_normalize(light.location)?;

    Ok(get_lighting(
        normal,
        view,
        ambient_light,
        light,
        ambient_reflect,
        diffuse_reflect,
        specular_reflect,
    ))
}

pub fn calculate_ambient(ambient_light: Color, ambient_reflect: &Reflectance) -> Color {
    let mut a = Color {
        red: ambient_reflect.red * ambient_light.red,
        green: ambient_reflect.green * ambient_light.green,
        blue: ambient_reflect.blue * ambient_light.blue,
    };

    limit_color(&mut a);
    a
}

pub fn calculate_diffuse(
    light: &PointLight,
    diffuse_reflect: &Reflectance,
    normal: Vector3<f64>,
) -> Color {
    let l_hat = normalize(light.location);
    let normal = normalize(normal);

    let mut prod = dot_product(normal, l_hat);
    // lit from behind
    if prod < 0.0 {
        prod = 0.0;
    }

    let mut d = Color {
        red: diffuse_reflect.red * light.color.red * prod,
        green: diffuse_reflect.green * light.color.green * prod,
        blue: diffuse_reflect.blue * light.color.blue * prod,
    };

    limit_color(&mut d);
    d
}

/// Unlike [`calculate_diffuse`], `prod` is not clamped: a light behind the
/// surface can still produce a highlight.
pub fn calculate_specular(
    light: &PointLight,
    specular_reflect: &Reflectance,
    view: Vector3<f64>,
    normal: Vector3<f64>,
) -> Color {
    let l_hat = normalize(light.location);
    let normal = normalize(normal);
    let prod = dot_product(normal, l_hat);

    let reflected = vector_reflect(l_hat, normal, prod);

    let r_dot_v = dot_product(reflected, view);
    // a negative base has no real power, it contributes nothing
    let scale = if r_dot_v < 0.0 {
        0.0
    } else {
        r_dot_v.powf(SPECULAR_EXPONENT)
    };

    let mut s = Color {
        red: specular_reflect.red * light.color.red * scale,
        green: specular_reflect.green * light.color.green * scale,
        blue: specular_reflect.blue * light.color.blue * scale,
    };

    limit_color(&mut s);
    s
}
