// Target Metadata - the payload shape the distribution target expects

use serde::Serialize;
use tracing::warn;

/// Metadata sent with a video upload or update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetMetadata {
    pub title: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub call_to_action: Option<CallToAction>,
    pub scheduled_publish_time: Option<i64>,
    pub published: Option<bool>,
}

/// Serialized as the JSON string the target reads from the `call_to_action` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: CallToActionValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallToActionValue {
    pub link: Option<String>,
    pub link_caption: Option<String>,
}

impl TargetMetadata {
    pub fn is_scheduled(&self) -> bool {
        self.scheduled_publish_time.is_some()
    }

    /// Flatten into form fields. `call_to_action` travels as a JSON string.
    pub fn to_form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(title) = &self.title {
            fields.push(("title", title.clone()));
        }
        if let Some(name) = &self.name {
            fields.push(("name", name.clone()));
        }
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        if let Some(cta) = &self.call_to_action {
            match serde_json::to_string(cta) {
                Ok(encoded) => fields.push(("call_to_action", encoded)),
                Err(e) => warn!(error = %e, "Dropping unencodable call_to_action"),
            }
        }
        if let Some(at) = self.scheduled_publish_time {
            fields.push(("scheduled_publish_time", at.to_string()));
        }
        if let Some(published) = self.published {
            fields.push(("published", published.to_string()));
        }
        fields
    }
}
