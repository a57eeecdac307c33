// Graph adapter settings

use serde::Deserialize;

/// Endpoints and transport limits for the Graph adapter.
///
/// Loaded from the `graph` section of the layered configuration; every field
/// has a default so the section may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Base URL for metadata, delete and caption calls
    pub api_base_url: String,
    /// Base URL for video upload calls
    pub video_base_url: String,
    /// Whole-request timeout; the engine itself defines none
    pub request_timeout_secs: u64,
    /// Files above this size use the resumable upload protocol
    pub chunk_threshold_bytes: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://graph.facebook.com/v19.0".to_string(),
            video_base_url: "https://graph-video.facebook.com/v19.0".to_string(),
            request_timeout_secs: 600,
            chunk_threshold_bytes: 256 * 1024 * 1024,
        }
    }
}

impl GraphConfig {
    /// Point both base URLs at one host (tests, proxies)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            api_base_url: base_url.clone(),
            video_base_url: base_url,
            ..Default::default()
        }
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url.trim_end_matches('/'), path)
    }

    pub(crate) fn video_url(&self, path: &str) -> String {
        format!("{}/{}", self.video_base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section_keeps_defaults() {
        let cfg: GraphConfig =
            serde_json::from_value(serde_json::json!({ "request_timeout_secs": 30 })).unwrap();
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.chunk_threshold_bytes, GraphConfig::default().chunk_threshold_bytes);
    }

    #[test]
    fn test_url_join_ignores_trailing_slash() {
        let cfg = GraphConfig::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(cfg.api_url("123/captions"), "http://127.0.0.1:9000/123/captions");
        assert_eq!(cfg.video_url("page/videos"), "http://127.0.0.1:9000/page/videos");
    }
}
