use async_trait::async_trait;
use std::{
    collections::HashMap,
    env,
    io::ErrorKind,
    path::PathBuf,
    sync::Arc,
};
use tokio::{fs, sync::Mutex};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage read/write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage payload could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key-value persistence port. The rest of the system never touches the
/// storage medium directly; swapping backends happens here.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("SLEEP_DATA_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from("data")
}

/// File-per-key backend: `<dir>/<key>.json`. The directory is created on
/// first write; a missing file reads as absent.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn shared(dir: impl Into<PathBuf>) -> Arc<dyn Storage> {
        Arc::new(Self::new(dir))
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.entry_path(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.entry_path(key), value).await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn shared() -> Arc<dyn Storage> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
