//! Error types for dock-registry

/// Registry store errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A required field was empty or missing.
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("Application already exists")]
    DuplicatePath,

    #[error("Application not found")]
    NotFound,

    #[error("Failed to read registry file: {0}")]
    StorageRead(#[source] std::io::Error),

    #[error("Registry file is corrupt: {0}")]
    StorageCorrupt(#[source] serde_json::Error),

    #[error("Failed to write registry file: {0}")]
    StorageWrite(#[source] std::io::Error),
}
