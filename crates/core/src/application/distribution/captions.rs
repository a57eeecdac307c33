// Caption locale resolution

use crate::domain::{CaptionInfo, DomainError};
use crate::port::LocaleTable;

/// Pick the locale a caption is registered under on the target.
///
/// Order: mapped language, then the label verbatim. A caption with neither a
/// language nor a label, or whose language is unmapped and has no label, is
/// rejected.
pub fn resolve_locale(
    table: &dyn LocaleTable,
    caption: &CaptionInfo,
) -> Result<String, DomainError> {
    let language = caption.language.as_deref().filter(|l| !l.trim().is_empty());
    let label = caption.label.as_deref().filter(|l| !l.trim().is_empty());

    if language.is_none() && label.is_none() {
        return Err(DomainError::CaptionWithoutLanguage {
            asset_id: caption.asset_id.clone(),
        });
    }

    if let Some(locale) = language.and_then(|l| table.locale_for(l)) {
        return Ok(locale);
    }

    match label {
        Some(label) => Ok(label.to_string()),
        None => Err(DomainError::NoLocale {
            language: language.map(str::to_string),
        }),
    }
}
