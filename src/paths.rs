//! Path and port configuration.
//!
//! Everything is overridable through environment variables so the service
//! can run from any working directory.

use std::fs;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 2354;

/// TCP port to bind (`APPDOCK_PORT`, default 2354).
pub fn server_port() -> u16 {
    std::env::var("APPDOCK_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Registry file location (`APPDOCK_DATA_FILE`, default ./applications.json).
pub fn data_file() -> PathBuf {
    std::env::var("APPDOCK_DATA_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("applications.json"))
}

/// Icon cache directory (`APPDOCK_ICON_CACHE`, default ./public/icons).
/// Created if missing.
pub fn icon_cache_dir() -> PathBuf {
    let dir = std::env::var("APPDOCK_ICON_CACHE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("public").join("icons"));
    fs::create_dir_all(&dir).ok();
    dir
}

/// Frontend bundle directory (`APPDOCK_DIST`, default ./dist).
pub fn dist_dir() -> PathBuf {
    std::env::var("APPDOCK_DIST")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("dist"))
}
