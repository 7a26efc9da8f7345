//! Core value types for user preferences.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::i18n::{self, TranslationMap};

/// Confidence threshold applied to every crop until the user changes it.
pub const DEFAULT_THRESHOLD: f64 = 0.70;

/// Detection domain with its own confidence threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    /// Rice leaf diseases.
    Rice,
    /// Mango leaf diseases.
    Mango,
    /// Soil condition classification.
    Soil,
    /// Corn leaf diseases.
    Corn,
}

impl Crop {
    /// Every crop, in the order the settings screen lists them.
    pub const ALL: [Self; 4] = [Self::Rice, Self::Mango, Self::Soil, Self::Corn];

    /// Return the identifier used in storage keys and on the command line.
    ///
    /// Inputs: none
    ///
    /// Output: Static lowercase identifier.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Rice => "rice",
            Self::Mango => "mango",
            Self::Soil => "soil",
            Self::Corn => "corn",
        }
    }

    /// Parse a crop from its identifier.
    ///
    /// Inputs: `s` identifier; surrounding whitespace is ignored.
    ///
    /// Output: `Some(Crop)` for one of the four canonical identifiers; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim() {
            "rice" => Some(Self::Rice),
            "mango" => Some(Self::Mango),
            "soil" => Some(Self::Soil),
            "corn" => Some(Self::Corn),
            _ => None,
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_config_key())
    }
}

/// UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English, the base language of the static table.
    #[default]
    En,
    /// Tagalog.
    Tl,
}

impl Language {
    /// Return the language tag used in storage and by translation endpoints.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Tl => "tl",
        }
    }

    /// Parse a language from its tag (`en` or `tl`).
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim() {
            "en" => Some(Self::En),
            "tl" => Some(Self::Tl),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_config_key())
    }
}

/// Unit used when showing weather readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureUnit {
    /// Return the string stored for this unit.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }

    /// Parse a unit from its stored string (`celsius` or `fahrenheit`).
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim() {
            "celsius" => Some(Self::Celsius),
            "fahrenheit" => Some(Self::Fahrenheit),
            _ => None,
        }
    }

    /// What: Convert a Celsius reading into this unit.
    ///
    /// Inputs:
    /// - `celsius`: Temperature as reported by the weather service.
    ///
    /// Output:
    /// - The same temperature expressed in `self`.
    #[must_use]
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius.mul_add(9.0 / 5.0, 32.0),
        }
    }

    /// What: Render a Celsius reading for display in this unit.
    ///
    /// Inputs:
    /// - `celsius`: Temperature as reported by the weather service.
    ///
    /// Output:
    /// - String with one decimal and the unit symbol, e.g. `"31.5°C"` or `"88.7°F"`.
    #[must_use]
    pub fn format(self, celsius: f64) -> String {
        let symbol = match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        };
        format!("{:.1}°{symbol}", self.from_celsius(celsius))
    }
}

/// Where the active translations came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationSource {
    /// Compile-time table (English always, Tagalog on startup or after a failed batch).
    #[default]
    Static,
    /// Result of a successful live translation batch.
    Live,
}

/// Language/translation state derived from a [`PreferenceSet`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguagePhase {
    /// Translations match `language`.
    Idle {
        /// Selected language.
        language: Language,
        /// Origin of the active strings.
        source: TranslationSource,
    },
    /// A live batch for `target` is in flight; the active strings are stale.
    Translating {
        /// Language being translated to.
        target: Language,
    },
}

/// Snapshot of every user preference plus the derived UI strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceSet {
    /// Per-crop minimum confidence, each within `[0.0, 1.0]`.
    pub confidence_thresholds: BTreeMap<Crop, f64>,
    /// Store captured photos in the device gallery.
    pub auto_save_photos: bool,
    /// Dark UI theme.
    pub dark_mode: bool,
    /// Unit for weather readings.
    pub temperature_unit: TemperatureUnit,
    /// Selected UI language.
    pub language: Language,
    /// UI strings for `language`; always carries every key of the English table.
    pub active_translations: TranslationMap,
    /// True while a live translation batch is in flight.
    pub is_loading_translations: bool,
    /// Origin of `active_translations`.
    pub translation_source: TranslationSource,
}

impl Default for PreferenceSet {
    fn default() -> Self {
        Self {
            confidence_thresholds: Crop::ALL
                .iter()
                .map(|&crop| (crop, DEFAULT_THRESHOLD))
                .collect(),
            auto_save_photos: true,
            dark_mode: false,
            temperature_unit: TemperatureUnit::Celsius,
            language: Language::En,
            active_translations: i18n::static_translations(Language::En),
            is_loading_translations: false,
            translation_source: TranslationSource::Static,
        }
    }
}

impl PreferenceSet {
    /// Confidence threshold for `crop`.
    #[must_use]
    pub fn threshold(&self, crop: Crop) -> f64 {
        self.confidence_thresholds
            .get(&crop)
            .copied()
            .unwrap_or(DEFAULT_THRESHOLD)
    }

    /// What: Decide whether a detection should be shown to the user.
    ///
    /// Inputs:
    /// - `crop`: Detection domain the model ran against.
    /// - `confidence`: Model confidence for the top prediction.
    ///
    /// Output:
    /// - `true` when `confidence` reaches the crop's threshold.
    #[must_use]
    pub fn accepts(&self, crop: Crop, confidence: f64) -> bool {
        confidence >= self.threshold(crop)
    }

    /// What: Look up a UI string in the active translations.
    ///
    /// Inputs:
    /// - `key`: Dot-notation key from the static table (e.g. `settings.language`).
    ///
    /// Output:
    /// - Active string, the English string if missing, or the key itself.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        i18n::translate_with_fallback(
            key,
            &self.active_translations,
            &i18n::static_translations(Language::En),
        )
    }

    /// Current language/translation phase.
    #[must_use]
    pub const fn phase(&self) -> LanguagePhase {
        if self.is_loading_translations {
            LanguagePhase::Translating {
                target: self.language,
            }
        } else {
            LanguagePhase::Idle {
                language: self.language,
                source: self.translation_source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Config keys map back to their variants; nothing else is accepted.
    ///
    /// - Input: Every variant's key, padded keys, aliases and unknown values
    /// - Output: Same variant for canonical keys; `None` for everything else
    fn config_keys_roundtrip_canonical_only() {
        for crop in Crop::ALL {
            assert_eq!(Crop::from_config_key(crop.as_config_key()), Some(crop));
        }
        assert_eq!(Crop::from_config_key(" corn "), Some(Crop::Corn));
        assert_eq!(Crop::from_config_key("maize"), None);
        assert_eq!(Crop::from_config_key("wheat"), None);

        assert_eq!(Language::from_config_key("tl"), Some(Language::Tl));
        assert_eq!(Language::from_config_key("en"), Some(Language::En));
        for alias in ["TL", "fil", "filipino", "english", "en-us", "de"] {
            assert_eq!(Language::from_config_key(alias), None, "{alias}");
        }

        assert_eq!(
            TemperatureUnit::from_config_key("fahrenheit"),
            Some(TemperatureUnit::Fahrenheit)
        );
        assert_eq!(
            TemperatureUnit::from_config_key("celsius"),
            Some(TemperatureUnit::Celsius)
        );
        for alias in ["F", "c", "°C", "kelvin"] {
            assert_eq!(TemperatureUnit::from_config_key(alias), None, "{alias}");
        }
    }

    #[test]
    /// What: Default preference set matches the documented defaults.
    ///
    /// - Input: `PreferenceSet::default()`
    /// - Output: All thresholds 0.70, auto-save on, light mode, Celsius, English, idle
    fn default_preferences() {
        let prefs = PreferenceSet::default();
        for crop in Crop::ALL {
            assert!((prefs.threshold(crop) - DEFAULT_THRESHOLD).abs() < f64::EPSILON);
        }
        assert!(prefs.auto_save_photos);
        assert!(!prefs.dark_mode);
        assert_eq!(prefs.temperature_unit, TemperatureUnit::Celsius);
        assert_eq!(
            prefs.phase(),
            LanguagePhase::Idle {
                language: Language::En,
                source: TranslationSource::Static
            }
        );
        assert_eq!(
            prefs.active_translations,
            i18n::static_translations(Language::En)
        );
    }

    #[test]
    /// What: Detection gating compares against the per-crop threshold inclusively.
    ///
    /// - Input: Rice threshold lowered to 0.5, mango at default
    /// - Output: 0.5 accepted for rice, 0.6 rejected for mango
    fn accepts_uses_per_crop_threshold() {
        let mut prefs = PreferenceSet::default();
        prefs.confidence_thresholds.insert(Crop::Rice, 0.5);
        assert!(prefs.accepts(Crop::Rice, 0.5));
        assert!(!prefs.accepts(Crop::Mango, 0.6));
        assert!(prefs.accepts(Crop::Mango, 0.7));
    }

    #[test]
    /// What: Temperature formatting converts and rounds to one decimal.
    ///
    /// - Input: 31.5°C in both units, 0°C and 100°C in Fahrenheit
    /// - Output: "31.5°C", "88.7°F", 32°F and 212°F
    fn temperature_formatting() {
        assert_eq!(TemperatureUnit::Celsius.format(31.5), "31.5°C");
        assert_eq!(TemperatureUnit::Fahrenheit.format(31.5), "88.7°F");
        assert!((TemperatureUnit::Fahrenheit.from_celsius(0.0) - 32.0).abs() < 1e-9);
        assert!((TemperatureUnit::Fahrenheit.from_celsius(100.0) - 212.0).abs() < 1e-9);
    }

    #[test]
    /// What: `text` falls back to English and then to the key.
    ///
    /// - Input: Active map missing one key
    /// - Output: English string for the missing key; key itself for unknown keys
    fn text_lookup_falls_back() {
        let mut prefs = PreferenceSet::default();
        prefs.active_translations = i18n::static_translations(Language::Tl);
        assert_eq!(prefs.text("settings.language"), "Wika");
        prefs.active_translations.remove("settings.language");
        assert_eq!(prefs.text("settings.language"), "Language");
        assert_eq!(prefs.text("no.such.key"), "no.such.key");
    }
}
