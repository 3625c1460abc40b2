use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanviewError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Fetch failed: {0}")]
    FetchFailure(String),

    #[error("Index {index} is out of range (valid: 0..{len})")]
    InvalidRange { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlanviewError {
    /// Whether the view layer should show an "unavailable" state for this error.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::FetchFailure(_))
    }
}
