use thiserror::Error;

/// Main error type for packviz
#[derive(Error, Debug)]
pub enum PackvizError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON snapshot decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML snapshot decoding errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The host context does not expose a recognizable record collection
    #[error("Input shape error: {0}")]
    InputShape(String),

    /// Parent pointers loop back onto a record already on the current path
    #[error("Cyclic hierarchy: {key} is its own ancestor")]
    CyclicHierarchy { key: String },

    /// Two records resolve to the same key (strict indexing only)
    #[error("Duplicate record key: {0}")]
    DuplicateKey(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PackvizError {
    /// Structural violations the views cannot route around.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::CyclicHierarchy { .. } | Self::DuplicateKey(_))
    }
}

/// Convenient Result type using PackvizError
pub type Result<T> = std::result::Result<T, PackvizError>;
