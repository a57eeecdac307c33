// Content Repository Port - local access to media and caption files

use async_trait::async_trait;
use std::path::Path;

/// Read access to asset files the host has synced locally.
///
/// Nothing is held open between calls: callers check, then use.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Whether the file is present and visible to this process
    async fn exists(&self, path: &Path) -> bool;

    /// Size of the file in bytes
    async fn file_size(&self, path: &Path) -> std::io::Result<u64>;
}

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// In-memory file listing: path -> size
    #[derive(Default)]
    pub struct InMemoryContentRepository {
        files: Mutex<HashMap<PathBuf, u64>>,
    }

    impl InMemoryContentRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(self, path: impl Into<PathBuf>, size: u64) -> Self {
            self.files.lock().unwrap().insert(path.into(), size);
            self
        }
    }

    #[async_trait]
    impl ContentRepository for InMemoryContentRepository {
        async fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        async fn file_size(&self, path: &Path) -> std::io::Result<u64> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .copied()
                .ok_or_else(|| {
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("{} not found", path.display()),
                    )
                })
        }
    }
}
