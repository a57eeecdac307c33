// Locale Table Port - internal language identifiers to target locale codes

/// Pure lookup from an internal language identifier to the target's locale
pub trait LocaleTable: Send + Sync {
    /// Target locale for `language`, or None when there is no mapping
    fn locale_for(&self, language: &str) -> Option<String>;
}

/// (language name, ISO 639-1 code, target locale)
const LANGUAGES: &[(&str, &str, &str)] = &[
    ("Afrikaans", "af", "af_ZA"),
    ("Albanian", "sq", "sq_AL"),
    ("Arabic", "ar", "ar_AR"),
    ("Armenian", "hy", "hy_AM"),
    ("Azerbaijani", "az", "az_AZ"),
    ("Basque", "eu", "eu_ES"),
    ("Belarusian", "be", "be_BY"),
    ("Bengali", "bn", "bn_IN"),
    ("Bosnian", "bs", "bs_BA"),
    ("Bulgarian", "bg", "bg_BG"),
    ("Catalan", "ca", "ca_ES"),
    ("Chinese", "zh", "zh_CN"),
    ("Croatian", "hr", "hr_HR"),
    ("Czech", "cs", "cs_CZ"),
    ("Danish", "da", "da_DK"),
    ("Dutch", "nl", "nl_NL"),
    ("English", "en", "en_US"),
    ("Estonian", "et", "et_EE"),
    ("Filipino", "tl", "tl_PH"),
    ("Finnish", "fi", "fi_FI"),
    ("French", "fr", "fr_FR"),
    ("Galician", "gl", "gl_ES"),
    ("Georgian", "ka", "ka_GE"),
    ("German", "de", "de_DE"),
    ("Greek", "el", "el_GR"),
    ("Gujarati", "gu", "gu_IN"),
    ("Hebrew", "he", "he_IL"),
    ("Hindi", "hi", "hi_IN"),
    ("Hungarian", "hu", "hu_HU"),
    ("Icelandic", "is", "is_IS"),
    ("Indonesian", "id", "id_ID"),
    ("Irish", "ga", "ga_IE"),
    ("Italian", "it", "it_IT"),
    ("Japanese", "ja", "ja_JP"),
    ("Kannada", "kn", "kn_IN"),
    ("Kazakh", "kk", "kk_KZ"),
    ("Khmer", "km", "km_KH"),
    ("Korean", "ko", "ko_KR"),
    ("Latvian", "lv", "lv_LV"),
    ("Lithuanian", "lt", "lt_LT"),
    ("Macedonian", "mk", "mk_MK"),
    ("Malay", "ms", "ms_MY"),
    ("Malayalam", "ml", "ml_IN"),
    ("Marathi", "mr", "mr_IN"),
    ("Mongolian", "mn", "mn_MN"),
    ("Nepali", "ne", "ne_NP"),
    ("Norwegian", "no", "nb_NO"),
    ("Persian", "fa", "fa_IR"),
    ("Polish", "pl", "pl_PL"),
    ("Portuguese", "pt", "pt_PT"),
    ("Punjabi", "pa", "pa_IN"),
    ("Romanian", "ro", "ro_RO"),
    ("Russian", "ru", "ru_RU"),
    ("Serbian", "sr", "sr_RS"),
    ("Slovak", "sk", "sk_SK"),
    ("Slovenian", "sl", "sl_SI"),
    ("Spanish", "es", "es_ES"),
    ("Swahili", "sw", "sw_KE"),
    ("Swedish", "sv", "sv_SE"),
    ("Tamil", "ta", "ta_IN"),
    ("Telugu", "te", "te_IN"),
    ("Thai", "th", "th_TH"),
    ("Turkish", "tr", "tr_TR"),
    ("Ukrainian", "uk", "uk_UA"),
    ("Urdu", "ur", "ur_PK"),
    ("Vietnamese", "vi", "vi_VN"),
    ("Welsh", "cy", "cy_GB"),
];

/// Regional variants that have their own locale on the target
const REGIONAL: &[(&str, &str)] = &[
    ("brazilian portuguese", "pt_BR"),
    ("portuguese (brazil)", "pt_BR"),
    ("pt-br", "pt_BR"),
    ("spanish (latin america)", "es_LA"),
    ("es-419", "es_LA"),
    ("chinese (traditional)", "zh_TW"),
    ("zh-tw", "zh_TW"),
    ("chinese (hong kong)", "zh_HK"),
    ("zh-hk", "zh_HK"),
    ("english (uk)", "en_GB"),
    ("en-gb", "en_GB"),
    ("french (canada)", "fr_CA"),
    ("fr-ca", "fr_CA"),
];

/// Built-in table covering the languages the target accepts captions for.
///
/// Matches language names and ISO codes case-insensitively.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinLocaleTable;

impl LocaleTable for BuiltinLocaleTable {
    fn locale_for(&self, language: &str) -> Option<String> {
        let key = language.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }

        if let Some((_, locale)) = REGIONAL.iter().find(|(alias, _)| *alias == key) {
            return Some((*locale).to_string());
        }

        LANGUAGES
            .iter()
            .find(|(name, code, _)| name.eq_ignore_ascii_case(&key) || *code == key)
            .map(|(_, _, locale)| (*locale).to_string())
    }
}
