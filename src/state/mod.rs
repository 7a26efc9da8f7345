//! Preference state types shared by the store, the CLI and embedding applications.

pub mod types;

pub use types::{
    Crop, DEFAULT_THRESHOLD, Language, LanguagePhase, PreferenceSet, TemperatureUnit,
    TranslationSource,
};
