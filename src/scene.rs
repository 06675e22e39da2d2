use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use nalgebra::Vector3;
use tobj::LoadOptions;
use tracing::{debug, info};
use yaml_rust::{Yaml, YamlLoader};

use crate::color::Color;
use crate::error::SceneError;
use crate::helpers::{yaml_array_into_vector3, yaml_into_u32};
use crate::lights::PointLight;
use crate::materials::{Material, Reflectance};
use crate::polygons::PolygonMatrix;

/// Lighting setup shared by every shaded point of a render.
#[derive(Debug, Clone)]
pub struct Scene {
    pub ambient: Color,
    pub view: Vector3<f64>,
    pub lights: Vec<PointLight>,
    pub materials: HashMap<String, Material>,
    pub threads: u32,
}

impl Scene {
    pub fn new(ambient: Color, view: Vector3<f64>, lights: Vec<PointLight>) -> Scene {
        Scene {
            ambient,
            view,
            lights,
            materials: HashMap::new(),
            threads: 1,
        }
    }

    pub fn load_from_folder(path: &Path) -> Result<Scene, SceneError> {
        info!(path = %path.display(), "Load scene");
        let mut file = File::open(path.join("scene.yaml"))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Scene::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Scene, SceneError> {
        let docs = YamlLoader::load_from_str(contents)?;
        let scene_yaml = docs.first().ok_or(SceneError::Empty)?;

        let ambient = Color::from_vector(require_vector3(scene_yaml, "ambient")?);
        let view = if scene_yaml["view"].is_badvalue() {
            Vector3::new(0.0, 0.0, 1.0)
        } else {
            require_vector3(scene_yaml, "view")?
        };

        let lights_yaml = scene_yaml["lights"]
            .as_vec()
            .ok_or_else(|| SceneError::MissingKey("lights".to_string()))?;

        let mut lights = vec![];
        for light_config in lights_yaml {
            let light = PointLight::new(
                require_vector3(light_config, "location")?,
                Color::from_vector(require_vector3(light_config, "color")?),
            );
            debug!(?light, "Loaded light");
            lights.push(light);
        }

        let mut materials = HashMap::new();
        if let Some(constants) = scene_yaml["constants"].as_hash() {
            for (name, config) in constants {
                let name = name.as_str().ok_or_else(|| SceneError::InvalidValue {
                    key: "constants".to_string(),
                    reason: "material names must be strings".to_string(),
                })?;
                let material = Material::new(
                    Reflectance::from_vector(require_vector3(config, "ambient")?),
                    Reflectance::from_vector(require_vector3(config, "diffuse")?),
                    Reflectance::from_vector(require_vector3(config, "specular")?),
                );
                debug!(name, ?material, "Loaded constants");
                materials.insert(name.to_string(), material);
            }
        }

        let threads = if scene_yaml["renderer"]["threads"].is_badvalue() {
            1
        } else {
            yaml_into_u32(&scene_yaml["renderer"]["threads"])
                .filter(|threads| *threads > 0)
                .ok_or_else(|| SceneError::InvalidValue {
                    key: "renderer.threads".to_string(),
                    reason: "expected a positive integer".to_string(),
                })?
        };

        info!(lights = lights.len(), materials = materials.len(), "Scene loaded");

        Ok(Scene {
            ambient,
            view,
            lights,
            materials,
            threads,
        })
    }

    /// Named constants, or the default material when no name is given.
    pub fn material(&self, name: Option<&str>) -> Result<Material, SceneError> {
        match name {
            Some(name) => self
                .materials
                .get(name)
                .copied()
                .ok_or_else(|| SceneError::UnknownMaterial(name.to_string())),
            None => Ok(Material::default()),
        }
    }
}

/// Loads a triangulated OBJ model as consecutive triangle vertices.
pub fn load_model(model_file: &Path) -> Result<PolygonMatrix, SceneError> {
    let (models, _materials) = tobj::load_obj(
        model_file,
        &LoadOptions {
            single_index: true,
            triangulate: true,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        },
    )?;

    let mut polygons = PolygonMatrix::new();
    for (i, m) in models.iter().enumerate() {
        debug!(model = i, name = %m.name, triangles = m.mesh.indices.len() / 3, "Loaded model");
        let mesh_polygons = PolygonMatrix::from_mesh(&m.mesh);
        polygons.x.extend(mesh_polygons.x);
        polygons.y.extend(mesh_polygons.y);
        polygons.z.extend(mesh_polygons.z);
    }

    info!(triangles = polygons.triangle_count(), "Model loaded");

    Ok(polygons)
}

fn require_vector3(yaml: &Yaml, key: &str) -> Result<Vector3<f64>, SceneError> {
    let value = &yaml[key];
    if value.is_badvalue() {
        return Err(SceneError::MissingKey(key.to_string()));
    }

    yaml_array_into_vector3(value).ok_or_else(|| SceneError::InvalidValue {
        key: key.to_string(),
        reason: "expected a list of three numbers".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector3;

    use crate::color::Color;
    use crate::error::SceneError;
    use crate::materials::{Material, Reflectance};
    use crate::scene::Scene;

    const SCENE: &str = "
ambient: [50, 50, 50]
lights:
  - location: [0.5, 0.75, 1]
    color: [0, 255, 255]
  - location: [-1, 0, 0]
    color: [255, 0, 0]
constants:
  shiny:
    ambient: [0.1, 0.1, 0.1]
    diffuse: [0.5, 0.5, 0.5]
    specular: [0.8, 0.8, 0.8]
renderer:
  threads: 4
";

    #[test]
    fn it_loads_lights_and_constants() {
        let scene = Scene::from_yaml_str(SCENE).unwrap();

        assert_eq!(Color::repeat(50.0), scene.ambient);
        assert_eq!(Vector3::new(0.0, 0.0, 1.0), scene.view);
        assert_eq!(2, scene.lights.len());
        assert_eq!(Vector3::new(0.5, 0.75, 1.0), scene.lights[0].location);
        assert_eq!(Color::new(0.0, 255.0, 255.0), scene.lights[0].color);
        assert_eq!(4, scene.threads);

        let shiny = scene.material(Some("shiny")).unwrap();
        assert_eq!(Reflectance::repeat(0.8), shiny.specular);
        assert_eq!(Material::default(), scene.material(None).unwrap());
    }

    #[test]
    fn it_rejects_unknown_constants() {
        let scene = Scene::from_yaml_str(SCENE).unwrap();

        assert!(matches!(
            scene.material(Some("matte")),
            Err(SceneError::UnknownMaterial(name)) if name == "matte"
        ));
    }

    #[test]
    fn it_requires_lights() {
        let result = Scene::from_yaml_str("ambient: [1, 1, 1]");

        assert!(matches!(result, Err(SceneError::MissingKey(key)) if key == "lights"));
    }

    #[test]
    fn it_rejects_malformed_vectors() {
        let result = Scene::from_yaml_str("ambient: [1, 1]\nlights: []");

        assert!(matches!(result, Err(SceneError::InvalidValue { key, .. }) if key == "ambient"));
    }

    #[test]
    fn it_rejects_zero_threads() {
        let result = Scene::from_yaml_str("ambient: [1, 1, 1]\nlights: []\nrenderer:\n  threads: 0");

        assert!(matches!(result, Err(SceneError::InvalidValue { key, .. }) if key == "renderer.threads"));
    }

    #[test]
    fn it_reads_a_custom_view() {
        let scene = Scene::from_yaml_str("ambient: [1, 1, 1]\nview: [0, 1, 0]\nlights: []").unwrap();

        assert_eq!(Vector3::new(0.0, 1.0, 0.0), scene.view);
        assert_eq!(1, scene.threads);
    }
}
