// Job Data Model
//
// Job data is built by the host for each invocation and handed to the engine.
// The engine mutates it in place (remote id, media files) but never persists it.

use serde::{Deserialize, Serialize};

use super::profile::DistributionProfile;

/// What the host remembers about this entry on the target
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDistribution {
    #[serde(default)]
    pub remote_id: Option<String>,
}

impl EntryDistribution {
    pub fn with_remote_id(remote_id: impl Into<String>) -> Self {
        Self {
            remote_id: Some(remote_id.into()),
        }
    }

    /// Remote id, treating an empty string as absent
    pub fn remote_id(&self) -> Option<&str> {
        self.remote_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Per-caption action requested by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributionAction {
    #[default]
    Submit,
    Delete,
}

/// Caption asset descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionInfo {
    pub asset_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    pub file_path: String,
    #[serde(default)]
    pub action: DistributionAction,
}

/// Caption file attached on the target, as recorded after submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMediaFile {
    pub asset_id: String,
    pub version: String,
    /// Locale the caption was registered under on the target
    pub remote_id: String,
}

/// Operation payload prepared by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderData {
    #[serde(default)]
    pub video_asset_file_path: Option<String>,
    #[serde(default)]
    pub thumb_asset_file_path: Option<String>,
    /// Stored field-value blob, parsed with [`super::FieldValues::parse`]
    #[serde(default)]
    pub field_values: String,
    #[serde(default)]
    pub captions_info: Vec<CaptionInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitJobData {
    #[serde(default)]
    pub distribution_profile: Option<DistributionProfile>,
    #[serde(default)]
    pub entry_distribution: EntryDistribution,
    #[serde(default)]
    pub provider_data: ProviderData,
    /// Set by the engine once the target has accepted the video
    #[serde(default)]
    pub remote_id: Option<String>,
    /// Captions attached during this submission
    #[serde(default)]
    pub media_files: Vec<RemoteMediaFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateJobData {
    #[serde(default)]
    pub distribution_profile: Option<DistributionProfile>,
    #[serde(default)]
    pub entry_distribution: EntryDistribution,
    #[serde(default)]
    pub provider_data: ProviderData,
    /// Captions currently attached on the target; replaced by the update
    #[serde(default)]
    pub media_files: Vec<RemoteMediaFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteJobData {
    #[serde(default)]
    pub distribution_profile: Option<DistributionProfile>,
    #[serde(default)]
    pub entry_distribution: EntryDistribution,
}

/// A job of any operation, tagged by `operation` in job files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum JobData {
    Submit(SubmitJobData),
    Update(UpdateJobData),
    Delete(DeleteJobData),
}

impl JobData {
    pub fn operation(&self) -> &'static str {
        match self {
            JobData::Submit(_) => "submit",
            JobData::Update(_) => "update",
            JobData::Delete(_) => "delete",
        }
    }
}

/// Successful result of one engine operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DistributionOutcome {
    /// Video uploaded and captions attached
    Submitted {
        remote_id: String,
        media_files: Vec<RemoteMediaFile>,
    },
    /// Entry already had a remote id; nothing was sent
    AlreadySubmitted { remote_id: String },
    /// Metadata updated and captions replaced
    Updated { media_files: Vec<RemoteMediaFile> },
    Deleted { remote_id: String },
}

impl DistributionOutcome {
    pub fn remote_id(&self) -> Option<&str> {
        match self {
            DistributionOutcome::Submitted { remote_id, .. }
            | DistributionOutcome::AlreadySubmitted { remote_id }
            | DistributionOutcome::Deleted { remote_id } => Some(remote_id),
            DistributionOutcome::Updated { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_file_deserializes_by_operation() {
        let job: JobData = serde_json::from_value(serde_json::json!({
            "operation": "update",
            "distribution_profile": {
                "provider": "graph_page",
                "page_id": "42",
                "page_access_token": "tok"
            },
            "entry_distribution": { "remote_id": "vid-1" },
            "provider_data": {
                "field_values": "{\"title\":\"Hello\"}",
                "captions_info": [
                    { "asset_id": "c1", "version": "2", "language": "French", "file_path": "/c1.srt" }
                ]
            },
            "media_files": [
                { "asset_id": "c0", "version": "1", "remote_id": "en_US" }
            ]
        }))
        .unwrap();

        let JobData::Update(update) = job else {
            panic!("expected update job");
        };
        assert_eq!(update.entry_distribution.remote_id(), Some("vid-1"));
        assert_eq!(update.provider_data.captions_info[0].action, DistributionAction::Submit);
        assert_eq!(update.media_files.len(), 1);
    }

    #[test]
    fn test_empty_remote_id_counts_as_absent() {
        let entry = EntryDistribution {
            remote_id: Some(String::new()),
        };
        assert_eq!(entry.remote_id(), None);
    }

    #[test]
    fn test_caption_action_wire_format() {
        let action: DistributionAction = serde_json::from_str("\"DELETE\"").unwrap();
        assert_eq!(action, DistributionAction::Delete);
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let outcome = DistributionOutcome::AlreadySubmitted {
            remote_id: "abc".to_string(),
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["outcome"], "already_submitted");
        assert_eq!(outcome.remote_id(), Some("abc"));
    }
}
