// Domain Layer - Job data, profiles and target schema

pub mod error;
pub mod field_values;
pub mod job_data;
pub mod metadata;
pub mod profile;

// Re-exports
pub use error::DomainError;
pub use field_values::FieldValues;
pub use job_data::{
    CaptionInfo, DeleteJobData, DistributionAction, DistributionOutcome, EntryDistribution,
    JobData, ProviderData, RemoteMediaFile, SubmitJobData, UpdateJobData,
};
pub use metadata::{CallToAction, CallToActionValue, TargetMetadata};
pub use profile::{AppCredentials, DistributionProfile, PageProfile};
