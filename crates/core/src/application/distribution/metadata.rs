// Field values -> target metadata

use crate::domain::{CallToAction, CallToActionValue, FieldValues, TargetMetadata};

/// Translate field values into the target's metadata schema.
///
/// Scheduling fields are only produced for submissions, and only when the
/// publish time is strictly after `now_secs`. Past or absent times are dropped.
pub fn to_target_metadata(fields: &FieldValues, for_submit: bool, now_secs: i64) -> TargetMetadata {
    let mut metadata = TargetMetadata {
        title: fields.title.clone(),
        name: fields.title.clone(),
        description: fields.description.clone(),
        ..Default::default()
    };

    if let Some(kind) = &fields.call_to_action_type {
        metadata.call_to_action = Some(CallToAction {
            kind: kind.clone(),
            value: CallToActionValue {
                link: fields.call_to_action_link.clone(),
                link_caption: fields.call_to_action_link_caption.clone(),
            },
        });
    }

    if for_submit {
        if let Some(at) = fields.schedule_publishing_time.filter(|at| *at > now_secs) {
            metadata.scheduled_publish_time = Some(at);
            metadata.published = Some(false);
        }
    }

    metadata
}
