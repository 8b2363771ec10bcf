//! Persistent storage for the personal access token.
//!
//! The gateway never reads credentials from ambient state; a [`TokenStore`]
//! is handed to it at construction.

use crate::error::{RepoViewerError, Result};
use crate::token::bearer;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::debug;

#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Raw token saved at sign-in, if any.
    async fn token(&self) -> Result<Option<String>>;

    async fn save_token(&self, token: &str) -> Result<()>;

    /// Stored token formatted as an `Authorization` header value.
    async fn token_for_github(&self) -> Result<String> {
        self.token()
            .await?
            .map(|token| bearer(&token))
            .ok_or(RepoViewerError::MissingToken)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Token kept in a small JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn token(&self) -> Result<Option<String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredToken = serde_json::from_str(&contents)?;
        Ok(Some(stored.token))
    }

    async fn save_token(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let stored = StoredToken {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        let contents = serde_json::to_vec_pretty(&stored)?;

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&self.path).await?;
        // `mode` only applies when the file is created
        restrict_to_owner(&file).await?;
        file.write_all(&contents).await?;
        file.flush().await?;

        debug!(path = %self.path.display(), "Saved token");
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_to_owner(file: &tokio::fs::File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_to_owner(_file: &tokio::fs::File) -> Result<()> {
    Ok(())
}

/// Token held in memory only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn token(&self) -> Result<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn save_token(&self, token: &str) -> Result<()> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.token().await.unwrap(), None);
        assert!(matches!(
            store.token_for_github().await,
            Err(RepoViewerError::MissingToken)
        ));

        store.save_token("ghp_secret").await.unwrap();
        assert_eq!(store.token().await.unwrap().as_deref(), Some("ghp_secret"));
        assert_eq!(store.token_for_github().await.unwrap(), "bearer ghp_secret");
    }

    #[tokio::test]
    async fn test_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token.json"));
        assert_eq!(store.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_creates_parent_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token.json"));

        store.save_token("first").await.unwrap();
        store.save_token("second").await.unwrap();

        assert_eq!(store.token().await.unwrap().as_deref(), Some("second"));
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"saved_at\""));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        // A file left readable by an older version is tightened on save
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        let store = FileTokenStore::new(&path);

        store.save_token("ghp_secret").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let fresh = FileTokenStore::new(dir.path().join("fresh.json"));
        fresh.save_token("ghp_secret").await.unwrap();
        let mode = std::fs::metadata(fresh.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileTokenStore::new(path);
        assert!(matches!(
            store.token().await,
            Err(RepoViewerError::JsonError(_))
        ));
    }
}
