//! Error types for dock-launch

/// Launch pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Unsupported OS")]
    UnsupportedPlatform,

    /// The launched process reported failure; carries the underlying
    /// error text (stderr, or the exit status when stderr was empty).
    #[error("{0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
