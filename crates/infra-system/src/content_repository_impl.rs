// Local filesystem ContentRepository

use async_trait::async_trait;
use relay_core::port::ContentRepository;
use std::path::Path;
use tracing::debug;

/// Reads asset files straight from the local filesystem.
///
/// Every call hits the filesystem again; nothing is cached, so a retried job
/// sees files that were synced in the meantime.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalContentRepository;

impl LocalContentRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentRepository for LocalContentRepository {
    async fn exists(&self, path: &Path) -> bool {
        match tokio::fs::metadata(path).await {
            Ok(meta) => meta.is_file(),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Asset not accessible");
                false
            }
        }
    }

    async fn file_size(&self, path: &Path) -> std::io::Result<u64> {
        Ok(tokio::fs::metadata(path).await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_existing_file_and_size() {
        let path = std::env::temp_dir().join(format!("relay-content-{}.bin", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, vec![0u8; 1234]).await.unwrap();

        let repo = LocalContentRepository::new();
        assert!(repo.exists(&path).await);
        assert_eq!(repo.file_size(&path).await.unwrap(), 1234);

        tokio::fs::remove_file(&path).await.unwrap();
        assert!(!repo.exists(&path).await);
    }

    #[tokio::test]
    async fn test_directory_is_not_an_asset() {
        let repo = LocalContentRepository::new();
        assert!(!repo.exists(&std::env::temp_dir()).await);
    }

    #[tokio::test]
    async fn test_size_of_missing_file_is_io_error() {
        let repo = LocalContentRepository::new();
        let err = repo
            .file_size(Path::new("/definitely/not/here.mp4"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
