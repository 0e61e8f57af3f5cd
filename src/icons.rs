//! Icon resolution pipeline.
//!
//! Providers are tried in order and the first hit wins: a remote lookup
//! keyed on the display name, then icons already installed on the host
//! (served out of the icon cache directory), then a static default. A
//! provider failure is never fatal; the worst case is the default icon.

use dock_registry::Application;
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::Duration;

/// Served when every other provider comes up empty.
pub const DEFAULT_ICON: &str =
    "https://cdn2.iconfinder.com/data/icons/metro-ui-icon-set/512/Default.png";

const ICON_EXTENSIONS: [&str; 4] = ["png", "svg", "xpm", "webp"];
const REMOTE_TIMEOUT: Duration = Duration::from_secs(5);

/// Ordered provider chain with early-success short-circuit.
pub struct IconResolver {
    providers: Vec<IconProvider>,
}

pub enum IconProvider {
    Remote(RemoteLookup),
    Local(LocalLookup),
    Default,
}

impl IconResolver {
    /// Full pipeline: remote lookup, then local icon index, then the default.
    pub fn new(cache_dir: PathBuf) -> Self {
        Self::with_providers(vec![
            IconProvider::Remote(RemoteLookup::new()),
            IconProvider::Local(LocalLookup::new(cache_dir)),
            IconProvider::Default,
        ])
    }

    pub fn with_providers(providers: Vec<IconProvider>) -> Self {
        Self { providers }
    }

    /// Resolve a display icon for `app`, falling back to [`DEFAULT_ICON`].
    pub async fn resolve(&self, app: &Application) -> String {
        for provider in &self.providers {
            if let Some(icon) = provider.resolve(app).await {
                return icon;
            }
        }
        DEFAULT_ICON.to_string()
    }

    /// Build the local icon index up front so the first list request does
    /// not pay for the directory scan.
    pub fn prewarm(&self) {
        for provider in &self.providers {
            if let IconProvider::Local(local) = provider {
                local.ensure_index();
            }
        }
    }
}

impl IconProvider {
    async fn resolve(&self, app: &Application) -> Option<String> {
        match self {
            IconProvider::Remote(remote) => remote.resolve(&app.name).await,
            IconProvider::Local(local) => local.resolve(&app.name),
            IconProvider::Default => Some(DEFAULT_ICON.to_string()),
        }
    }
}

/// Probes simpleicons.org for an SVG matching the application name.
pub struct RemoteLookup {
    client: reqwest::Client,
}

impl RemoteLookup {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REMOTE_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    async fn resolve(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }

        let slug = name.to_lowercase().replace(' ', "");
        let url = format!("https://simpleicons.org/icons/{slug}.svg");

        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => Some(url),
            Ok(response) => {
                debug!("No remote icon for {name}: HTTP {}", response.status());
                None
            }
            Err(e) => {
                warn!("Failed to fetch icon for {name}: {e}");
                None
            }
        }
    }
}

/// Looks up icons installed on the host (XDG icon and pixmap directories)
/// and serves hits out of the cache directory under the sanitized
/// application name.
pub struct LocalLookup {
    cache_dir: PathBuf,
    /// Lowercase file stem -> source path. Built on first use.
    index: RwLock<Option<HashMap<String, PathBuf>>>,
}

impl LocalLookup {
    pub fn new(cache_dir: PathBuf) -> Self {
        fs::create_dir_all(&cache_dir).ok();
        Self {
            cache_dir,
            index: RwLock::new(None),
        }
    }

    fn resolve(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        let key = sanitize_name(name);

        // Already cached from an earlier lookup.
        for ext in ICON_EXTENSIONS {
            let file = format!("{key}.{ext}");
            if self.cache_dir.join(&file).exists() {
                return Some(format!("/api/icons/{file}"));
            }
        }

        // "Google Chrome" installs its icon as google-chrome, so try the
        // sanitized key before the bare lowercase name.
        let source = self
            .lookup(&key)
            .or_else(|| self.lookup(&name.to_lowercase()))?;
        let ext = source.extension()?.to_str()?.to_lowercase();
        let file = format!("{key}.{ext}");

        if let Err(e) = fs::copy(&source, self.cache_dir.join(&file)) {
            warn!("Failed to cache icon for {name}: {e}");
            return None;
        }
        Some(format!("/api/icons/{file}"))
    }

    fn lookup(&self, stem: &str) -> Option<PathBuf> {
        self.ensure_index();
        let index = self.index.read().unwrap();
        index.as_ref().and_then(|index| index.get(stem).cloned())
    }

    fn ensure_index(&self) {
        if self.index.read().unwrap().is_some() {
            return;
        }
        let built = build_icon_index();
        debug!("Indexed {} host icons", built.len());
        *self.index.write().unwrap() = Some(built);
    }
}

fn icon_directories() -> Vec<PathBuf> {
    let mut out = Vec::new();
    let home = dirs::home_dir().unwrap_or_default();

    let xdg_data_home = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home.join(".local/share"));
    let xdg_data_dirs = std::env::var("XDG_DATA_DIRS")
        .unwrap_or_else(|_| "/usr/local/share:/usr/share".to_string());

    out.push(xdg_data_home.join("icons"));
    out.push(home.join(".icons"));

    for data_dir in xdg_data_dirs.split(':') {
        if !data_dir.is_empty() {
            out.push(PathBuf::from(data_dir).join("icons"));
            out.push(PathBuf::from(data_dir).join("pixmaps"));
        }
    }

    out.push(PathBuf::from("/usr/share/pixmaps"));
    out
}

fn build_icon_index() -> HashMap<String, PathBuf> {
    let mut index = HashMap::new();

    for dir in icon_directories() {
        if !dir.exists() {
            continue;
        }

        let walker = walkdir::WalkDir::new(&dir).follow_links(true).max_depth(10);
        for entry in walker.into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() && !entry.file_type().is_symlink() {
                continue;
            }

            let path = entry.path();
            let ext = match path.extension().and_then(|e| e.to_str()) {
                Some(e) => e.to_lowercase(),
                None => continue,
            };
            if !ICON_EXTENSIONS.contains(&ext.as_str()) {
                continue;
            }

            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(s) => s.to_lowercase(),
                None => continue,
            };

            // First match wins, matching theme directory precedence.
            index.entry(stem).or_insert_with(|| path.to_path_buf());
        }
    }

    index
}

/// File-system friendly key for an application name.
fn sanitize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sanitize_name_is_lowercase_filesystem_safe() {
        assert_eq!(sanitize_name("Google Chrome"), "google-chrome");
        assert_eq!(sanitize_name("my_app-2"), "my_app-2");
        assert_eq!(sanitize_name("a/b:c"), "a-b-c");
    }

    #[tokio::test]
    async fn default_provider_always_matches() {
        let resolver = IconResolver::with_providers(vec![IconProvider::Default]);
        let app = Application::new("Anything", "/bin/anything", "");
        assert_eq!(resolver.resolve(&app).await, DEFAULT_ICON);
    }

    #[tokio::test]
    async fn empty_chain_falls_back_to_default() {
        let resolver = IconResolver::with_providers(Vec::new());
        let app = Application::new("Anything", "/bin/anything", "");
        assert_eq!(resolver.resolve(&app).await, DEFAULT_ICON);
    }

    #[tokio::test]
    async fn cached_icon_short_circuits_before_the_default() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("firefox.png"), b"png").unwrap();

        let resolver = IconResolver::with_providers(vec![
            IconProvider::Local(LocalLookup::new(dir.path().to_path_buf())),
            IconProvider::Default,
        ]);
        let app = Application::new("Firefox", "/usr/bin/firefox", "");
        assert_eq!(resolver.resolve(&app).await, "/api/icons/firefox.png");
    }
}
