use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::{Result, StorageError};

/// Async key/value persistence for session values.
///
/// Multi-key writes must land together: either every entry is visible to a
/// later `get` or none is.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set_many(&self, entries: &[(&str, &str)]) -> Result<()>;

    async fn remove_many(&self, keys: &[&str]) -> Result<()>;
}

/// In-process storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut values = self.values.write().await;
        for (k, v) in entries {
            values.insert((*k).to_string(), (*v).to_string());
        }
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut values = self.values.write().await;
        for k in keys {
            values.remove(*k);
        }
        Ok(())
    }
}

/// A JSON document on disk, replaced atomically on every write.
///
/// The file is written to a temporary sibling and renamed over the target,
/// so readers see either the old or the new document.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path { &self.path }

    async fn load(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StorageError::Read {
                path:   self.path.clone(),
                source: e,
            }),
        }
    }

    async fn store(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_vec_pretty(values)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || atomic_write(&path, &content))
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?
    }
}

fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let write_err = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".session.")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(write_err)?;
    tmp.write_all(content).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[async_trait]
impl SessionStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut values = self.load().await.unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable session file");
            BTreeMap::new()
        });
        for (k, v) in entries {
            values.insert((*k).to_string(), (*v).to_string());
        }
        self.store(&values).await
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut values = match self.load().await {
            Ok(values) => values,
            Err(StorageError::Malformed(_)) => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        for k in keys {
            values.remove(*k);
        }
        self.store(&values).await
    }
}
