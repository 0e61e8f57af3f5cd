//! Registry record types.

use serde::{Deserialize, Serialize};

/// A registered application as persisted in the registry file.
///
/// `path` is the identity key: no two records in a registry share one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Display label, also used as the icon lookup key.
    pub name: String,
    /// Executable path or platform-specific launch target.
    pub path: String,
    /// Free-form argument string handed to the launch command.
    #[serde(default)]
    pub params: String,
}

impl Application {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        params: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            params: params.into(),
        }
    }
}

/// Default entries written when no registry file exists yet.
pub fn seed_applications() -> Vec<Application> {
    vec![
        Application::new(
            "Google Chrome",
            "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
            "google.com",
        ),
        Application::new("Notepad", "notepad.exe", ""),
    ]
}
