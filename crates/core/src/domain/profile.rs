// Distribution profiles and application credentials

use serde::{Deserialize, Serialize};

/// Target-specific configuration attached to a job by the host.
///
/// Tagged by `provider`. Tags this engine does not handle still deserialize
/// (as `Unsupported`) so the engine can reject them with a configuration error
/// instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum DistributionProfile {
    GraphPage(PageProfile),
    #[serde(other)]
    Unsupported,
}

impl DistributionProfile {
    pub fn as_page(&self) -> Option<&PageProfile> {
        match self {
            DistributionProfile::GraphPage(page) => Some(page),
            DistributionProfile::Unsupported => None,
        }
    }
}

/// Page the content is published to, plus the token acting on its behalf
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageProfile {
    pub page_id: String,
    pub page_access_token: String,
}

impl PageProfile {
    pub fn new(page_id: impl Into<String>, page_access_token: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            page_access_token: page_access_token.into(),
        }
    }
}

impl std::fmt::Debug for PageProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageProfile")
            .field("page_id", &self.page_id)
            .field("page_access_token", &"<redacted>")
            .finish()
    }
}

/// Application credentials, loaded once when the engine is configured.
///
/// Empty values are allowed at load time; the engine rejects them before
/// running any operation.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppCredentials {
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub app_secret: String,
}

impl AppCredentials {
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
        }
    }
}

impl std::fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}
