// Domain Error Types

use thiserror::Error;

/// Bad input detected while interpreting job data
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Malformed field values: {0}")]
    MalformedFieldValues(#[from] serde_json::Error),

    #[error("No label/language were configured for caption asset {asset_id}")]
    CaptionWithoutLanguage { asset_id: String },

    #[error(
        "Failed to find matching locale for language {language:?} and there was no label available"
    )]
    NoLocale { language: Option<String> },
}

pub type Result<T> = std::result::Result<T, DomainError>;
