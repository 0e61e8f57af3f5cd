//! File-backed registry store.

use crate::error::RegistryError;
use crate::types::{Application, seed_applications};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable CRUD over the application collection.
///
/// Every operation re-reads the registry file before acting and persists the
/// result before returning, so the file is the single source of truth. A
/// writer mutex is held across each whole load-mutate-save cycle; concurrent
/// mutations serialize instead of losing updates.
pub struct RegistryStore {
    data_file: PathBuf,
    write_lock: Mutex<()>,
}

impl RegistryStore {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the underlying registry file.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Load the registry, seeding the default entries if no file exists yet.
    pub fn load(&self) -> Result<Vec<Application>, RegistryError> {
        let _guard = self.write_lock.lock().unwrap();
        self.load_locked()
    }

    /// Current registry contents for serving: read failures degrade to an
    /// empty registry (logged) so a damaged file never takes listing down.
    pub fn list(&self) -> Vec<Application> {
        let _guard = self.write_lock.lock().unwrap();
        self.load_or_empty()
    }

    /// Persist the full sequence, replacing prior content.
    pub fn save(&self, apps: &[Application]) -> Result<(), RegistryError> {
        let _guard = self.write_lock.lock().unwrap();
        self.save_locked(apps)
    }

    /// Append a new application, enforcing path uniqueness.
    /// Returns the updated sequence.
    pub fn add(
        &self,
        name: &str,
        path: &str,
        params: Option<&str>,
    ) -> Result<Vec<Application>, RegistryError> {
        if name.is_empty() || path.is_empty() {
            return Err(RegistryError::InvalidInput(
                "Application name and path are required",
            ));
        }

        let _guard = self.write_lock.lock().unwrap();
        let mut apps = self.load_or_empty();
        if apps.iter().any(|app| app.path == path) {
            return Err(RegistryError::DuplicatePath);
        }

        apps.push(Application::new(name, path, params.unwrap_or("")));
        self.save_locked(&apps)?;
        Ok(apps)
    }

    /// Remove every entry whose path matches. Returns the updated sequence.
    pub fn remove(&self, path: &str) -> Result<Vec<Application>, RegistryError> {
        if path.is_empty() {
            return Err(RegistryError::InvalidInput("Application path is required"));
        }

        let _guard = self.write_lock.lock().unwrap();
        let apps = self.load_or_empty();
        let remaining: Vec<Application> =
            apps.iter().filter(|app| app.path != path).cloned().collect();
        if remaining.len() == apps.len() {
            return Err(RegistryError::NotFound);
        }

        self.save_locked(&remaining)?;
        Ok(remaining)
    }

    fn load_locked(&self) -> Result<Vec<Application>, RegistryError> {
        if !self.data_file.exists() {
            let seeds = seed_applications();
            self.save_locked(&seeds)?;
            info!(
                "Seeded registry at {} with {} default entries",
                self.data_file.display(),
                seeds.len()
            );
            return Ok(seeds);
        }

        let content =
            fs::read_to_string(&self.data_file).map_err(RegistryError::StorageRead)?;
        serde_json::from_str(&content).map_err(RegistryError::StorageCorrupt)
    }

    fn load_or_empty(&self) -> Vec<Application> {
        match self.load_locked() {
            Ok(apps) => apps,
            Err(e) => {
                warn!("Error loading applications: {e}");
                Vec::new()
            }
        }
    }

    fn save_locked(&self, apps: &[Application]) -> Result<(), RegistryError> {
        let json = serde_json::to_string_pretty(apps)
            .map_err(|e| RegistryError::StorageWrite(e.into()))?;

        // Write a sibling temp file first so a failed write never clobbers
        // the previous registry.
        let tmp = self.data_file.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(RegistryError::StorageWrite)?;
        fs::rename(&tmp, &self.data_file).map_err(RegistryError::StorageWrite)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> RegistryStore {
        RegistryStore::new(dir.path().join("applications.json"))
    }

    #[test]
    fn first_load_seeds_two_entries_idempotently() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let apps = store.load().unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].name, "Google Chrome");
        assert_eq!(apps[1].name, "Notepad");

        // Reloading yields the same two records, not four.
        assert_eq!(store.load().unwrap(), apps);
    }

    #[test]
    fn add_then_list_includes_entry() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let apps = store.add("Foo", "/bin/foo", Some("--bar")).unwrap();
        assert_eq!(apps.len(), 3);
        assert!(store.list().iter().any(|a| a.path == "/bin/foo"));
    }

    #[test]
    fn duplicate_path_rejected_and_registry_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.add("Foo", "/bin/foo", None).unwrap();
        let before = store.list();

        let err = store.add("Other Name", "/bin/foo", None).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicatePath));
        assert_eq!(store.list(), before);
    }

    #[test]
    fn empty_name_or_path_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let before = store.list();

        assert!(matches!(
            store.add("", "/bin/foo", None),
            Err(RegistryError::InvalidInput(_))
        ));
        assert!(matches!(
            store.add("Foo", "", None),
            Err(RegistryError::InvalidInput(_))
        ));
        assert!(matches!(
            store.remove(""),
            Err(RegistryError::InvalidInput(_))
        ));
        assert_eq!(store.list(), before);
    }

    #[test]
    fn remove_unknown_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let before = store.list();

        let err = store.remove("/does/not/exist").unwrap_err();
        assert!(matches!(err, RegistryError::NotFound));
        assert_eq!(store.list(), before);
    }

    #[test]
    fn remove_drops_exactly_one_entry() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.add("Foo", "/bin/foo", None).unwrap();
        let before = store.list().len();

        let after = store.remove("/bin/foo").unwrap();
        assert_eq!(after.len(), before - 1);
        assert!(store.list().iter().all(|a| a.path != "/bin/foo"));
    }

    #[test]
    fn params_default_to_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let apps = store.add("Foo", "/bin/foo", None).unwrap();
        assert_eq!(apps.last().unwrap().params, "");
    }

    #[test]
    fn corrupt_file_surfaces_error_but_listing_degrades() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.data_file(), "not json at all").unwrap();

        assert!(matches!(
            store.load(),
            Err(RegistryError::StorageCorrupt(_))
        ));
        assert!(store.list().is_empty());
    }

    #[test]
    fn concurrent_distinct_adds_both_land() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&dir));
        store.load().unwrap();

        let handles: Vec<_> = ["/bin/a", "/bin/b"]
            .into_iter()
            .map(|path| {
                let store = store.clone();
                thread::spawn(move || store.add("App", path, None).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let apps = store.list();
        assert_eq!(apps.len(), 4);
        assert!(apps.iter().any(|a| a.path == "/bin/a"));
        assert!(apps.iter().any(|a| a.path == "/bin/b"));
    }
}
