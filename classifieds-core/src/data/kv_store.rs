use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::{fs, sync::RwLock};
use tracing::{debug, error, info};

use crate::domain::error::DomainError;

/// Flat string-to-string storage every repository is layered on.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    async fn set(&self, key: &str, value: String) -> Result<(), DomainError>;
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}

pub async fn read_json<S, T>(store: &S, key: &str) -> Result<Option<T>, DomainError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
            error!(key, "corrupt record: {}", e);
            DomainError::Storage(format!("corrupt record at {}: {}", key, e))
        }),
        None => Ok(None),
    }
}

pub async fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), DomainError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}

/// Process-local store, used by tests and throwaway runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        self.inner.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.inner.write().await.remove(key);
        Ok(())
    }
}

/// Key-value map persisted as a single JSON object on disk.
///
/// Every mutation rewrites the file through a temporary sibling and a rename,
/// so the data file always holds a complete snapshot.
#[derive(Debug)]
pub struct JsonFileStore {
    inner: RwLock<HashMap<String, String>>,
    file_path: PathBuf,
    tmp_path: PathBuf,
}

impl JsonFileStore {
    /// Opens the store at `path`. Parent directories and the file are only
    /// created when the file does not exist yet; an existing file is read,
    /// never rewritten.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, DomainError> {
        let file_path = path.into();
        let tmp_path = tmp_path_for(&file_path);

        let (map, created) = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => (HashMap::new(), false),
            Ok(bytes) => {
                let map: HashMap<String, String> = serde_json::from_slice(&bytes).map_err(|e| {
                    error!(path = %file_path.display(), "failed to parse data file: {}", e);
                    DomainError::Storage(format!(
                        "corrupt data file {}: {}",
                        file_path.display(),
                        e
                    ))
                })?;
                (map, false)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (HashMap::new(), true),
            Err(e) => return Err(e.into()),
        };

        let store = Self {
            inner: RwLock::new(map),
            file_path,
            tmp_path,
        };
        if created {
            if let Some(parent) = store.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await?;
            }
            store.save(&HashMap::new()).await?;
            info!(path = %store.file_path.display(), "created new data file");
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    async fn save(&self, map: &HashMap<String, String>) -> Result<(), DomainError> {
        let data = serde_json::to_vec_pretty(map)?;
        fs::write(&self.tmp_path, data).await.map_err(|e| {
            error!(path = %self.tmp_path.display(), "failed to write data file: {}", e);
            DomainError::from(e)
        })?;
        fs::rename(&self.tmp_path, &self.file_path).await?;
        debug!(path = %self.file_path.display(), keys = map.len(), "data file saved");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.inner.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        let mut map = self.inner.write().await;
        let mut next = map.clone();
        next.insert(key.to_string(), value);
        self.save(&next).await?;
        *map = next;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let mut map = self.inner.write().await;
        if !map.contains_key(key) {
            return Ok(());
        }
        let mut next = map.clone();
        next.remove(key);
        self.save(&next).await?;
        *map = next;
        Ok(())
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "classifieds.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
