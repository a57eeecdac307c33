// Field Values - typed view of the stored metadata blob

use serde::{Deserialize, Deserializer};

use super::error::{DomainError, Result};

/// Known distribution fields for one entry.
///
/// Parsed from the JSON blob the host stores with the entry distribution.
/// Unknown keys and wrongly typed values are rejected; empty strings are
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldValues {
    #[serde(default, deserialize_with = "non_empty")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub call_to_action_type: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub call_to_action_link: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub call_to_action_link_caption: Option<String>,
    /// Unix timestamp (seconds)
    #[serde(default)]
    pub schedule_publishing_time: Option<i64>,
}

impl FieldValues {
    /// Parse the stored blob. A blank blob yields all fields absent.
    pub fn parse(blob: &str) -> Result<Self> {
        if blob.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(blob).map_err(DomainError::MalformedFieldValues)
    }
}

fn non_empty<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
