use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LightingError {
    #[error("Cannot normalize a vector of magnitude {magnitude}")]
    DegenerateVector { magnitude: f64 },

    #[error("Triangle starting at vertex {index} reads past the last vertex (mesh has {len})")]
    VertexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] yaml_rust::ScanError),

    #[error("Scene file is empty")]
    Empty,

    #[error("Missing required key: {0}")]
    MissingKey(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Unknown material constants: {0}")]
    UnknownMaterial(String),

    #[error("Model load error: {0}")]
    Model(#[from] tobj::LoadError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render thread {0} panicked")]
    WorkerPanicked(u32),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
