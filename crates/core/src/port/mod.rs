// Port Layer - Interfaces for external collaborators

pub mod content_repository;
pub mod credential_store;
pub mod distribution_api;
pub mod locale_table;
pub mod time_provider;

// Re-exports
pub use content_repository::ContentRepository;
pub use credential_store::CredentialStore;
pub use distribution_api::{
    ApiError, ApiOperation, CaptionUpload, DistributionApi, VideoUpload,
};
pub use locale_table::{BuiltinLocaleTable, LocaleTable};
pub use time_provider::TimeProvider;
