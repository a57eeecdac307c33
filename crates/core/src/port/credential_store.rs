// Credential Store Port - where application credentials come from

use crate::domain::AppCredentials;
use crate::error::Result;
use async_trait::async_trait;

/// Source of application credentials, read once at engine setup.
///
/// Missing values load as empty strings. A source that cannot be read at all
/// fails with `AppError::Config`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> Result<AppCredentials>;
}

pub mod mocks {
    use super::*;

    /// Returns fixed credentials
    pub struct StaticCredentialStore {
        credentials: AppCredentials,
    }

    impl StaticCredentialStore {
        pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
            Self {
                credentials: AppCredentials::new(app_id, app_secret),
            }
        }
    }

    #[async_trait]
    impl CredentialStore for StaticCredentialStore {
        async fn load(&self) -> Result<AppCredentials> {
            Ok(self.credentials.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::StaticCredentialStore;
    use super::*;

    #[test]
    fn test_static_store_returns_configured_credentials() {
        let store = StaticCredentialStore::new("app-id", "");
        let credentials = tokio_test::block_on(store.load()).unwrap();

        assert_eq!(credentials.app_id, "app-id");
        assert!(credentials.app_secret.is_empty());
    }
}
