// SetKit Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetkitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Camera not found: {0}")]
    CameraNotFound(String),

    #[error("Lens not found: {0}")]
    LensNotFound(String),

    #[error("Accessory not found: {0}")]
    AccessoryNotFound(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("No items in package to export")]
    EmptyPackage,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SetkitError>;
