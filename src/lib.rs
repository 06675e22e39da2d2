pub mod color;
pub mod error;
pub mod film;
pub mod helpers;
pub mod lighting;
pub mod lights;
pub mod materials;
pub mod polygons;
pub mod renderer;
pub mod scene;

pub use color::{limit_color, Color};
pub use helpers::{calculate_normal, dot_product, normalize};
pub use lighting::{calculate_ambient, calculate_diffuse, calculate_specular, get_lighting};
pub use lights::PointLight;
pub use materials::{Material, Reflectance};
pub use polygons::PolygonMatrix;
