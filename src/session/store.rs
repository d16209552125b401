use std::path::PathBuf;

use crate::{config, types::TokenRecord};

/// Persists the current [`TokenRecord`] as JSON.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<data_local_dir>/spotroast/cache/session.json`
    pub fn default_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/session.json");
        path
    }

    /// Reads the stored record.
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(TokenRecord)` - The record as last persisted, errored or not
    /// - `Err(String)` - No session on disk, or the file is not a valid record
    ///
    /// # Example
    ///
    /// ```
    /// let store = SessionStore::default();
    /// let record = store.load().await?;
    /// let resolved = manager.resolve(record, Utc::now()).await;
    /// ```
    pub async fn load(&self) -> Result<TokenRecord, String> {
        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|e| e.to_string())?;
        serde_json::from_str(&content).map_err(|e| e.to_string())
    }

    /// Writes `record` as pretty-printed JSON, creating the cache directory
    /// when needed. An existing session is overwritten.
    ///
    /// # Errors
    ///
    /// Returns the I/O or serialization error as a string.
    pub async fn persist(&self, record: &TokenRecord) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(record).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Deletes the stored record. Clearing an absent session is not an error.
    pub async fn clear(&self) -> Result<(), String> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}
