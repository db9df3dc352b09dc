use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use tracing::warn;

/// Well-known key holding the serialized profile document the other screens
/// read and write. The menu engine itself never touches it.
pub const PROFILE_KEY: &str = "profile";

trait ProfileStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn save(&self) -> anyhow::Result<()>;
}

/// Key-value map persisted as one JSON object on disk. Loaded once on open;
/// `save` rewrites the whole file atomically.
struct JsonFileStore {
    path: PathBuf,
    data: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    fn open(path: &Path) -> anyhow::Result<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<HashMap<String, String>>(&contents) {
                Ok(map) => map,
                Err(err) => {
                    // A mangled sidecar file must not take the app down;
                    // start over and let the next save repair it.
                    warn!(
                        target: "limone",
                        event = "profile_store_reset",
                        path = %path.display(),
                        error = %err
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("read profile store {}", path.display()))
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            data: Mutex::new(data),
        })
    }
}

impl ProfileStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data
            .lock()
            .map(|guard| guard.get(key).cloned())
            .unwrap_or_default()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.data.lock() {
            guard.insert(key.to_string(), value.to_string());
        }
    }

    fn save(&self) -> anyhow::Result<()> {
        let serialized = {
            let guard = self
                .data
                .lock()
                .map_err(|_| anyhow::anyhow!("profile store mutex poisoned"))?;
            serde_json::to_string_pretty(&*guard).context("serialize profile store")?
        };

        let parent = self
            .path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("profile store path has no parent directory"))?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create profile store directory {}", parent.display()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .context("create temporary profile store file")?;
        tmp.write_all(serialized.as_bytes())
            .context("write profile store contents")?;
        tmp.persist(&self.path)
            .with_context(|| format!("persist profile store {}", self.path.display()))?;
        Ok(())
    }
}

#[derive(Default)]
struct MemoryStore {
    data: Mutex<HashMap<String, String>>,
}

impl ProfileStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data
            .lock()
            .map(|guard| guard.get(key).cloned())
            .unwrap_or_default()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.data.lock() {
            guard.insert(key.to_string(), value.to_string());
        }
    }

    fn save(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Cloneable handle to the profile key-value store.
#[derive(Clone)]
pub struct StoreHandle {
    inner: Arc<dyn ProfileStore + Send + Sync>,
}

impl StoreHandle {
    /// Open (or start) the JSON-file store at `path`.
    pub fn json_file(path: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            inner: Arc::new(JsonFileStore::open(path)?),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(MemoryStore::default()),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    pub fn set(&self, key: &str, value: &str) {
        self.inner.set(key, value);
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.inner.save()
    }
}
