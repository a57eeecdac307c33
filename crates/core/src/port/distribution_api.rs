// Distribution API Port - the external platform content is pushed to

use crate::domain::{AppCredentials, TargetMetadata};
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// External call being made, used to label failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    UploadVideo,
    UpdateVideo,
    DeleteVideo,
    UploadCaptions,
    DeleteCaptions,
}

impl std::fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiOperation::UploadVideo => write!(f, "upload video"),
            ApiOperation::UpdateVideo => write!(f, "update video"),
            ApiOperation::DeleteVideo => write!(f, "delete video"),
            ApiOperation::UploadCaptions => write!(f, "upload captions"),
            ApiOperation::DeleteCaptions => write!(f, "delete captions"),
        }
    }
}

/// Errors raised by a distribution API adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote error {code} ({kind}): {message}")]
    Remote {
        code: i64,
        kind: String,
        message: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl ApiError {
    /// Failures below the application layer (connection, timeout)
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

/// Arguments of a video upload
#[derive(Debug, Clone, Copy)]
pub struct VideoUpload<'a> {
    /// Target container (page) the video is published to
    pub page_id: &'a str,
    pub access_token: &'a str,
    pub video_path: &'a Path,
    pub thumb_path: Option<&'a Path>,
    pub file_size: u64,
    pub scratch_dir: &'a Path,
    pub metadata: &'a TargetMetadata,
}

/// Arguments of a caption upload
#[derive(Debug, Clone, Copy)]
pub struct CaptionUpload<'a> {
    pub access_token: &'a str,
    pub video_id: &'a str,
    pub caption_path: &'a Path,
    pub locale: &'a str,
    pub scratch_dir: &'a Path,
}

/// External distribution API
///
/// Implementations:
/// - GraphDistributionApi (relay-infra-graph): Graph-style REST API over HTTP
/// - mocks::RecordingDistributionApi: records calls for tests
#[async_trait]
pub trait DistributionApi: Send + Sync {
    /// Upload a video and return the id the target assigned to it
    async fn upload_video(
        &self,
        credentials: &AppCredentials,
        upload: VideoUpload<'_>,
    ) -> Result<String, ApiError>;

    /// Replace metadata of an uploaded video
    async fn update_video(
        &self,
        credentials: &AppCredentials,
        access_token: &str,
        metadata: &TargetMetadata,
        video_id: &str,
    ) -> Result<(), ApiError>;

    async fn delete_video(
        &self,
        credentials: &AppCredentials,
        access_token: &str,
        video_id: &str,
    ) -> Result<(), ApiError>;

    /// Attach a caption file under the given locale
    async fn upload_captions(
        &self,
        credentials: &AppCredentials,
        upload: CaptionUpload<'_>,
    ) -> Result<(), ApiError>;

    /// Remove the caption registered under the given locale
    async fn delete_captions(
        &self,
        credentials: &AppCredentials,
        access_token: &str,
        video_id: &str,
        locale: &str,
    ) -> Result<(), ApiError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// One recorded call, in the order it was made
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ApiCall {
        UploadVideo {
            page_id: String,
            video_path: PathBuf,
            thumb_path: Option<PathBuf>,
            file_size: u64,
            metadata: TargetMetadata,
        },
        UpdateVideo {
            video_id: String,
            metadata: TargetMetadata,
        },
        DeleteVideo {
            video_id: String,
        },
        UploadCaptions {
            video_id: String,
            caption_path: PathBuf,
            locale: String,
        },
        DeleteCaptions {
            video_id: String,
            locale: String,
        },
    }

    impl ApiCall {
        pub fn operation(&self) -> ApiOperation {
            match self {
                ApiCall::UploadVideo { .. } => ApiOperation::UploadVideo,
                ApiCall::UpdateVideo { .. } => ApiOperation::UpdateVideo,
                ApiCall::DeleteVideo { .. } => ApiOperation::DeleteVideo,
                ApiCall::UploadCaptions { .. } => ApiOperation::UploadCaptions,
                ApiCall::DeleteCaptions { .. } => ApiOperation::DeleteCaptions,
            }
        }
    }

    /// Records every call and answers with canned results
    pub struct RecordingDistributionApi {
        video_id: String,
        calls: Mutex<Vec<ApiCall>>,
        failures: Mutex<HashMap<ApiOperation, ApiError>>,
    }

    impl RecordingDistributionApi {
        /// Uploads succeed and return `video_id`
        pub fn new(video_id: impl Into<String>) -> Self {
            Self {
                video_id: video_id.into(),
                calls: Mutex::new(Vec::new()),
                failures: Mutex::new(HashMap::new()),
            }
        }

        /// Make every call of `operation` fail with `error` (the call is still recorded)
        pub fn fail_on(self, operation: ApiOperation, error: ApiError) -> Self {
            self.failures.lock().unwrap().insert(operation, error);
            self
        }

        pub fn calls(&self) -> Vec<ApiCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn operations(&self) -> Vec<ApiOperation> {
            self.calls().iter().map(ApiCall::operation).collect()
        }

        fn record(&self, call: ApiCall) -> Result<(), ApiError> {
            let operation = call.operation();
            self.calls.lock().unwrap().push(call);
            match self.failures.lock().unwrap().get(&operation) {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl DistributionApi for RecordingDistributionApi {
        async fn upload_video(
            &self,
            _credentials: &AppCredentials,
            upload: VideoUpload<'_>,
        ) -> Result<String, ApiError> {
            self.record(ApiCall::UploadVideo {
                page_id: upload.page_id.to_string(),
                video_path: upload.video_path.to_path_buf(),
                thumb_path: upload.thumb_path.map(Path::to_path_buf),
                file_size: upload.file_size,
                metadata: upload.metadata.clone(),
            })?;
            Ok(self.video_id.clone())
        }

        async fn update_video(
            &self,
            _credentials: &AppCredentials,
            _access_token: &str,
            metadata: &TargetMetadata,
            video_id: &str,
        ) -> Result<(), ApiError> {
            self.record(ApiCall::UpdateVideo {
                video_id: video_id.to_string(),
                metadata: metadata.clone(),
            })
        }

        async fn delete_video(
            &self,
            _credentials: &AppCredentials,
            _access_token: &str,
            video_id: &str,
        ) -> Result<(), ApiError> {
            self.record(ApiCall::DeleteVideo {
                video_id: video_id.to_string(),
            })
        }

        async fn upload_captions(
            &self,
            _credentials: &AppCredentials,
            upload: CaptionUpload<'_>,
        ) -> Result<(), ApiError> {
            self.record(ApiCall::UploadCaptions {
                video_id: upload.video_id.to_string(),
                caption_path: upload.caption_path.to_path_buf(),
                locale: upload.locale.to_string(),
            })
        }

        async fn delete_captions(
            &self,
            _credentials: &AppCredentials,
            _access_token: &str,
            video_id: &str,
            locale: &str,
        ) -> Result<(), ApiError> {
            self.record(ApiCall::DeleteCaptions {
                video_id: video_id.to_string(),
                locale: locale.to_string(),
            })
        }
    }
}
