//! Compile-time localization table.

use crate::i18n::translations::TranslationMap;
use crate::state::Language;

/// One UI string in every supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRow {
    /// Dot-notation key.
    pub key: &'static str,
    /// English text; also the source text for live translation.
    pub en: &'static str,
    /// Tagalog text used at startup and whenever live translation fails.
    pub tl: &'static str,
}

impl TableRow {
    /// Text of this row for `language`.
    #[must_use]
    pub const fn text(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.en,
            Language::Tl => self.tl,
        }
    }
}

/// Declared key order is the order live translation batches are sent in.
pub const STATIC_TABLE: &[TableRow] = &[
    TableRow {
        key: "home.title",
        en: "Crop Disease Scanner",
        tl: "Pang-scan ng Sakit ng Pananim",
    },
    TableRow {
        key: "home.scan_leaf",
        en: "Scan a Leaf",
        tl: "I-scan ang Dahon",
    },
    TableRow {
        key: "home.scan_soil",
        en: "Scan Soil",
        tl: "I-scan ang Lupa",
    },
    TableRow {
        key: "home.history",
        en: "Scan History",
        tl: "Kasaysayan ng Pag-scan",
    },
    TableRow {
        key: "home.field_notes",
        en: "Field Notes",
        tl: "Mga Tala sa Bukid",
    },
    TableRow {
        key: "scan.take_photo",
        en: "Take Photo",
        tl: "Kumuha ng Larawan",
    },
    TableRow {
        key: "scan.choose_gallery",
        en: "Choose from Gallery",
        tl: "Pumili mula sa Gallery",
    },
    TableRow {
        key: "scan.analyzing",
        en: "Analyzing image...",
        tl: "Sinusuri ang larawan...",
    },
    TableRow {
        key: "scan.confidence",
        en: "Confidence",
        tl: "Kumpiyansa",
    },
    TableRow {
        key: "scan.no_detection",
        en: "No disease detected above the confidence threshold",
        tl: "Walang nakitang sakit na lampas sa antas ng kumpiyansa",
    },
    TableRow {
        key: "disease.symptoms",
        en: "Symptoms",
        tl: "Mga Sintomas",
    },
    TableRow {
        key: "disease.treatment",
        en: "Treatment",
        tl: "Lunas",
    },
    TableRow {
        key: "disease.prevention",
        en: "Prevention",
        tl: "Pag-iwas",
    },
    TableRow {
        key: "weather.title",
        en: "Weather Risk",
        tl: "Panganib sa Panahon",
    },
    TableRow {
        key: "weather.high_humidity",
        en: "High humidity increases fungal disease risk",
        tl: "Pinapataas ng mataas na halumigmig ang panganib ng sakit mula sa fungus",
    },
    TableRow {
        key: "weather.rain_expected",
        en: "Rain expected: delay spraying",
        tl: "Inaasahan ang ulan: ipagpaliban ang pag-spray",
    },
    TableRow {
        key: "settings.title",
        en: "Settings",
        tl: "Mga Setting",
    },
    TableRow {
        key: "settings.confidence_threshold",
        en: "Confidence Threshold",
        tl: "Antas ng Kumpiyansa",
    },
    TableRow {
        key: "settings.auto_save",
        en: "Auto-save Photos",
        tl: "Awtomatikong I-save ang mga Larawan",
    },
    TableRow {
        key: "settings.dark_mode",
        en: "Dark Mode",
        tl: "Madilim na Mode",
    },
    TableRow {
        key: "settings.temperature_unit",
        en: "Temperature Unit",
        tl: "Yunit ng Temperatura",
    },
    TableRow {
        key: "settings.language",
        en: "Language",
        tl: "Wika",
    },
    TableRow {
        key: "common.save",
        en: "Save",
        tl: "I-save",
    },
    TableRow {
        key: "common.cancel",
        en: "Cancel",
        tl: "Kanselahin",
    },
    TableRow {
        key: "common.retry",
        en: "Try Again",
        tl: "Subukang Muli",
    },
];

/// What: Build the complete static translation map for a language.
///
/// Inputs:
/// - `language`: Target language.
///
/// Output:
/// - `TranslationMap` holding every key of [`STATIC_TABLE`].
#[must_use]
pub fn static_translations(language: Language) -> TranslationMap {
    STATIC_TABLE
        .iter()
        .map(|row| (row.key.to_string(), row.text(language).to_string()))
        .collect()
}

/// Static text for `key` in `language`, if the key exists.
#[must_use]
pub fn static_text(language: Language, key: &str) -> Option<&'static str> {
    STATIC_TABLE
        .iter()
        .find(|row| row.key == key)
        .map(|row| row.text(language))
}

/// What: List `(key, English text)` pairs in declared order.
///
/// Output:
/// - Pairs in the exact order live translation batches must use.
#[must_use]
pub fn english_rows() -> Vec<(&'static str, &'static str)> {
    STATIC_TABLE.iter().map(|row| (row.key, row.en)).collect()
}
