// Central Error Type for the Distribution Engine

use crate::port::distribution_api::{ApiError, ApiOperation};
use thiserror::Error;

/// Missing preconditions for an operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrerequisiteError {
    #[error("No video asset to distribute")]
    NoAsset,

    #[error("The file [{path}] was not found (probably not synced yet)")]
    AssetNotSynced { path: String },

    #[error("Remote id is empty - nothing to {0}")]
    MissingRemoteId(&'static str),
}

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prerequisite error: {0}")]
    Prerequisite(#[from] PrerequisiteError),

    #[error("Validation error: {0}")]
    Validation(#[from] crate::domain::DomainError),

    #[error("Failed to {operation}, reason: {source}")]
    ExternalApi {
        operation: ApiOperation,
        #[source]
        source: ApiError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a host should treat a failed job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Same job may succeed later without changes
    Retryable,
    /// Job input or configuration must change first
    Fatal,
}

impl AppError {
    pub fn external(operation: ApiOperation, source: ApiError) -> Self {
        AppError::ExternalApi { operation, source }
    }

    /// Classify the failure for the job host.
    ///
    /// Unsynced assets and transport-level API failures are retryable.
    /// Everything else needs a change in input or configuration.
    pub fn disposition(&self) -> Disposition {
        match self {
            AppError::Prerequisite(PrerequisiteError::AssetNotSynced { .. }) => {
                Disposition::Retryable
            }
            AppError::ExternalApi { source, .. } if source.is_transient() => {
                Disposition::Retryable
            }
            _ => Disposition::Fatal,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.disposition() == Disposition::Retryable
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
