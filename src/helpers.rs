use nalgebra::Vector3;
use yaml_rust::Yaml;

use crate::error::LightingError;
use crate::polygons::PolygonMatrix;

/// Divides every component by the euclidean magnitude. The zero vector comes
/// back as NaN components.
pub fn normalize(vector: Vector3<f64>) -> Vector3<f64> {
    let magnitude = magnitude(vector);

    Vector3::new(
        vector.x / magnitude,
        vector.y / magnitude,
        vector.z / magnitude,
    )
}

pub fn try_normalize(vector: Vector3<f64>) -> Result<Vector3<f64>, LightingError> {
    let magnitude = magnitude(vector);
    if magnitude == 0.0 || !magnitude.is_finite() {
        return Err(LightingError::DegenerateVector { magnitude });
    }

    Ok(normalize(vector))
}

fn magnitude(vector: Vector3<f64>) -> f64 {
    (vector.x * vector.x + vector.y * vector.y + vector.z * vector.z).sqrt()
}

pub fn dot_product(a: Vector3<f64>, b: Vector3<f64>) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

pub fn cross_product(a: Vector3<f64>, b: Vector3<f64>) -> Vector3<f64> {
    Vector3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

/// Mirrors `light` around `normal`, `prod` being their dot product.
pub fn vector_reflect(light: Vector3<f64>, normal: Vector3<f64>, prod: f64) -> Vector3<f64> {
    Vector3::new(
        2.0 * normal.x * prod - light.x,
        2.0 * normal.y * prod - light.y,
        2.0 * normal.z * prod - light.z,
    )
}

/// Surface normal of the triangle whose first vertex sits at index `i`.
/// The result is not normalized. Panics when `i + 2` is past the last vertex.
pub fn calculate_normal(polygons: &PolygonMatrix, i: usize) -> Vector3<f64> {
    let p0 = polygons.vertex(i);
    let p1 = polygons.vertex(i + 1);
    let p2 = polygons.vertex(i + 2);

    let a = p1 - p0;
    let b = p2 - p0;

    cross_product(a, b)
}

pub fn try_calculate_normal(
    polygons: &PolygonMatrix,
    i: usize,
) -> Result<Vector3<f64>, LightingError> {
    let len = polygons.len();
    if i.checked_add(2).map_or(true, |last| last >= len) {
        return Err(LightingError::VertexOutOfRange { index: i, len });
    }

    Ok(calculate_normal(polygons, i))
}

pub fn yaml_into_f64(yaml: &Yaml) -> Option<f64> {
    yaml.as_f64().or_else(|| yaml.as_i64().map(|value| value as f64))
}

pub fn yaml_into_u32(yaml: &Yaml) -> Option<u32> {
    yaml.as_i64().and_then(|value| u32::try_from(value).ok())
}

pub fn yaml_array_into_vector3(yaml: &Yaml) -> Option<Vector3<f64>> {
    let values = yaml.as_vec()?;
    if values.len() != 3 {
        return None;
    }

    Some(Vector3::new(
        yaml_into_f64(&values[0])?,
        yaml_into_f64(&values[1])?,
        yaml_into_f64(&values[2])?,
    ))
}
