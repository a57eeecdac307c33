// Relay Infrastructure - Local Adapters
// Implements: ContentRepository (local filesystem), CredentialStore (file + environment)

pub mod content_repository_impl;
pub mod credential_store_impl;

pub use content_repository_impl::LocalContentRepository;
pub use credential_store_impl::{expand_path, LayeredCredentialStore, ENV_PREFIX};
