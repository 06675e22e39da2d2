use std::cmp;
use std::thread;
use std::time::Instant;

use nalgebra::{Vector2, Vector3};
use tracing::{debug, info};

use crate::color::{limit_color, Color};
use crate::error::{LightingError, RenderError};
use crate::film::Film;
use crate::helpers::{calculate_normal, try_normalize};
use crate::lighting::{calculate_ambient, calculate_diffuse, calculate_specular};
use crate::materials::Material;
use crate::polygons::PolygonMatrix;
use crate::scene::Scene;

#[derive(Debug, Copy, Clone)]
pub struct Settings {
    pub thread_count: u32,
    pub image_size: Vector2<u32>,
    pub radius: f64,
}

/// Shades one point against every light of the scene. The first light goes
/// through the full model, further lights only add their diffuse and specular
/// terms so ambient is counted once.
pub fn shade_point(scene: &Scene, material: &Material, normal: Vector3<f64>) -> Color {
    let Some((first, rest)) = scene.lights.split_first() else {
        return calculate_ambient(scene.ambient, &material.ambient);
    };

    let mut color = material.shade(normal, scene.view, scene.ambient, first);
    for light in rest {
        color = color
            + calculate_diffuse(light, &material.diffuse, normal)
            + calculate_specular(light, &material.specular, scene.view, normal);
    }

    limit_color(&mut color);
    color
}

/// Flat color of the triangle starting at vertex `i`.
pub fn shade_face(polygons: &PolygonMatrix, i: usize, scene: &Scene, material: &Material) -> Color {
    shade_point(scene, material, calculate_normal(polygons, i))
}

/// Flat colors of every triangle, skipping the ones whose normal has zero
/// length instead of shading them NaN.
pub fn try_shade_faces(
    polygons: &PolygonMatrix,
    scene: &Scene,
    material: &Material,
) -> Vec<Result<Color, LightingError>> {
    (0..polygons.triangle_count())
        .map(|face| {
            let normal = calculate_normal(polygons, face * 3);
            try_normalize(normal)?;

            Ok(shade_point(scene, material, normal))
        })
        .collect()
}

pub fn shade_faces(polygons: &PolygonMatrix, scene: &Scene, material: &Material) -> Vec<Color> {
    (0..polygons.triangle_count())
        .map(|face| shade_face(polygons, face * 3, scene, material))
        .collect()
}

/// Normal of an orthographic sphere centered in the image, or `None` outside
/// the disc. The normal is left unnormalized.
pub fn sphere_normal(x: u32, y: u32, image_size: Vector2<u32>, radius: f64) -> Option<Vector3<f64>> {
    let dx = x as f64 + 0.5 - image_size.x as f64 / 2.0;
    // image rows grow downwards, world y grows upwards
    let dy = image_size.y as f64 / 2.0 - (y as f64 + 0.5);

    let dz_squared = radius * radius - dx * dx - dy * dy;
    if dz_squared < 0.0 {
        return None;
    }

    Some(Vector3::new(dx, dy, dz_squared.sqrt()))
}

fn render_rows(
    scene: &Scene,
    material: &Material,
    settings: &Settings,
    y_start: u32,
    y_end: u32,
) -> Vec<(u32, Vec<Color>)> {
    (y_start..y_end)
        .map(|y| {
            let row = (0..settings.image_size.x)
                .map(|x| match sphere_normal(x, y, settings.image_size, settings.radius) {
                    Some(normal) => shade_point(scene, material, normal),
                    None => Color::black(),
                })
                .collect();

            (y, row)
        })
        .collect()
}

/// Threads actually spawned: at least one, never more than there are rows.
pub fn worker_count(settings: &Settings) -> u32 {
    settings.thread_count.clamp(1, settings.image_size.y.max(1))
}

/// Renders a lit sphere, splitting the rows into one band per thread.
pub fn render_sphere(
    scene: &Scene,
    material: &Material,
    settings: Settings,
) -> Result<Film, RenderError> {
    let start_time = Instant::now();
    let mut film = Film::new(settings.image_size);
    let thread_count = worker_count(&settings);
    let band_height = settings.image_size.y.div_ceil(thread_count).max(1);

    info!(
        width = settings.image_size.x,
        height = settings.image_size.y,
        threads = thread_count,
        "Start rendering"
    );

    let bands = thread::scope(|s| {
        let handles: Vec<_> = (0..thread_count)
            .map(|thread_id| {
                let y_start = cmp::min(thread_id * band_height, settings.image_size.y);
                let y_end = cmp::min(y_start + band_height, settings.image_size.y);
                let handle = s.spawn(move || render_rows(scene, material, &settings, y_start, y_end));

                (thread_id, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(thread_id, handle)| {
                handle
                    .join()
                    .map_err(|_| RenderError::WorkerPanicked(thread_id))
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    for rows in bands {
        for (y, row) in rows {
            film.write_row(y, &row);
        }
    }

    debug!(elapsed = ?start_time.elapsed(), "All work is done");

    Ok(film)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector2, Vector3};

    use crate::color::Color;
    use crate::lighting::get_lighting;
    use crate::lights::PointLight;
    use crate::materials::{Material, Reflectance};
    use crate::polygons::PolygonMatrix;
    use crate::renderer::*;
    use crate::scene::Scene;

    fn scene(lights: Vec<PointLight>) -> Scene {
        Scene::new(Color::repeat(50.0), Vector3::new(0.0, 0.0, 1.0), lights)
    }

    #[test]
    fn it_matches_the_model_for_a_single_light() {
        let light = PointLight::new(Vector3::new(0.5, 0.75, 1.0), Color::new(0.0, 255.0, 255.0));
        let scene = scene(vec![light]);
        let material = Material::default();
        let normal = Vector3::new(0.1, 0.2, 1.0);

        let expected = get_lighting(
            normal,
            scene.view,
            scene.ambient,
            &light,
            &material.ambient,
            &material.diffuse,
            &material.specular,
        );

        assert_eq!(expected, shade_point(&scene, &material, normal));
    }

    #[test]
    fn it_counts_ambient_once_across_lights() {
        let material = Material::new(
            Reflectance::repeat(0.2),
            Reflectance::repeat(0.1),
            Reflectance::repeat(0.0),
        );
        let light = PointLight::new(Vector3::new(0.0, 0.0, 1.0), Color::repeat(100.0));
        let normal = Vector3::new(0.0, 0.0, 1.0);

        let color = shade_point(&scene(vec![light, light]), &material, normal);

        // 50 * 0.2 + 2 * 100 * 0.1
        assert_relative_eq!(30.0, color.red, epsilon = 1.0e-9);
        assert_relative_eq!(30.0, color.blue, epsilon = 1.0e-9);
    }

    #[test]
    fn it_falls_back_to_ambient_without_lights() {
        let color = shade_point(&scene(vec![]), &Material::default(), Vector3::new(0.0, 0.0, 1.0));

        assert_relative_eq!(5.0, color.green, epsilon = 1.0e-9);
    }

    #[test]
    fn it_shades_faces_by_winding() {
        let mut polygons = PolygonMatrix::new();
        polygons.add_polygon(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        polygons.add_polygon(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        );
        let reflect = Reflectance::repeat(0.3);
        let material = Material::new(reflect, reflect, reflect);
        let scene = scene(vec![PointLight::new(Vector3::new(0.0, 0.0, 1.0), Color::repeat(255.0))]);

        let colors = shade_faces(&polygons, &scene, &material);

        assert_eq!(2, colors.len());
        assert_relative_eq!(168.0, colors[0].red, epsilon = 1.0e-9);
        // facing away: ambient plus the unclamped specular path
        assert!(colors[1].red < colors[0].red);
    }

    #[test]
    fn it_finds_sphere_normals() {
        let size = Vector2::new(10, 10);

        let center = sphere_normal(5, 5, size, 4.0).unwrap();
        assert!(center.z > 3.8);
        assert_eq!(None, sphere_normal(0, 0, size, 4.0));

        // upper rows point up
        assert!(sphere_normal(5, 2, size, 4.0).unwrap().y > 0.0);
    }

    #[test]
    fn it_renders_brighter_towards_the_light() {
        let scene = scene(vec![PointLight::new(Vector3::new(-1.0, 1.0, 1.0), Color::repeat(255.0))]);
        let settings = Settings {
            thread_count: 3,
            image_size: Vector2::new(32, 32),
            radius: 14.0,
        };

        let film = render_sphere(&scene, &Material::default(), settings).unwrap();

        assert_eq!([0, 0, 0], film.pixel(0, 0));
        let upper_left = film.pixel(10, 10);
        let lower_right = film.pixel(22, 22);
        assert!(upper_left[0] > lower_right[0]);
    }

    #[test]
    fn it_renders_the_same_with_any_thread_count() {
        let scene = scene(vec![PointLight::new(Vector3::new(0.5, 0.75, 1.0), Color::repeat(255.0))]);
        let mut settings = Settings {
            thread_count: 1,
            image_size: Vector2::new(17, 9),
            radius: 4.0,
        };

        let single = render_sphere(&scene, &Material::default(), settings).unwrap();
        settings.thread_count = 4;
        let threaded = render_sphere(&scene, &Material::default(), settings).unwrap();

        assert_eq!(single.image_buffer, threaded.image_buffer);
    }

    #[test]
    fn it_never_spawns_more_threads_than_rows() {
        let scene = scene(vec![PointLight::new(Vector3::new(0.5, 0.75, 1.0), Color::repeat(255.0))]);
        let mut settings = Settings {
            thread_count: 4_000_000_000,
            image_size: Vector2::new(8, 8),
            radius: 3.0,
        };
        assert_eq!(8, worker_count(&settings));

        let crowded = render_sphere(&scene, &Material::default(), settings).unwrap();
        settings.thread_count = 1;
        let single = render_sphere(&scene, &Material::default(), settings).unwrap();

        assert_eq!(single.image_buffer, crowded.image_buffer);
    }

    #[test]
    fn it_keeps_one_worker_for_empty_images() {
        let settings = Settings {
            thread_count: 0,
            image_size: Vector2::new(0, 0),
            radius: 1.0,
        };

        assert_eq!(1, worker_count(&settings));
        assert!(render_sphere(&scene(vec![]), &Material::default(), settings).is_ok());
    }

    #[test]
    fn it_skips_degenerate_faces() {
        let mut polygons = PolygonMatrix::new();
        polygons.add_polygon(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        // collinear
        polygons.add_polygon(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        let scene = scene(vec![PointLight::new(Vector3::new(0.0, 0.0, 1.0), Color::repeat(255.0))]);

        let colors = try_shade_faces(&polygons, &scene, &Material::default());

        assert_eq!(2, colors.len());
        assert_eq!(
            &shade_faces(&polygons, &scene, &Material::default())[0],
            colors[0].as_ref().unwrap()
        );
        assert_eq!(
            Err(LightingError::DegenerateVector { magnitude: 0.0 }),
            colors[1]
        );
    }
}
