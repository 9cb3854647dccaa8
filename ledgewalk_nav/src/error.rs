// Error types for the path builder.
//
// A build over valid input fails in exactly one way: the assembled graph is
// larger than the navigator can hold. The remaining variants cover loading
// levels and configs from disk.

/// Errors returned by the path builder and its loaders.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("navigation graph has {actual} nodes, maximum is {max}")]
    TooManyNodes { actual: usize, max: usize },

    #[error("navigation graph has {actual} edges, maximum is {max}")]
    TooManyEdges { actual: usize, max: usize },

    #[error("invalid nav config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NavError {
    /// True for the capacity failures a user fixes by simplifying geometry.
    pub fn is_capacity(&self) -> bool {
        matches!(self, Self::TooManyNodes { .. } | Self::TooManyEdges { .. })
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
