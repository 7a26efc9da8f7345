//! Loading preferences from storage, including the legacy threshold migration.

use crate::i18n;
use crate::state::{Crop, Language, PreferenceSet, TemperatureUnit, TranslationSource};
use crate::storage::{KeyValueStore, keys};
use crate::util::parse_bool;

/// What: Read one key, swallowing backend errors.
///
/// Output:
/// - The stored value, or `None` when absent or unreadable.
async fn read_key<S: KeyValueStore>(storage: &S, key: &'static str) -> Option<String> {
    match storage.get(key).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read preference; using default");
            None
        }
    }
}

/// What: Parse a stored threshold.
///
/// Output:
/// - `Some(value)` clamped into `[0.0, 1.0]`; `None` when absent, unparsable or non-finite.
fn parse_threshold(key: &str, raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v.clamp(0.0, 1.0)),
        _ => {
            tracing::warn!(key, value = raw, "unparsable confidence threshold; using default");
            None
        }
    }
}

/// Parse a value with `parse`, logging and discarding values it rejects.
fn parse_with<V>(key: &str, raw: Option<&str>, parse: impl FnOnce(&str) -> Option<V>) -> Option<V> {
    let raw = raw?;
    let parsed = parse(raw);
    if parsed.is_none() {
        tracing::warn!(key, value = raw, "unrecognized preference value; using default");
    }
    parsed
}

/// What: Build a [`PreferenceSet`] from storage.
///
/// Details:
/// - The legacy crop-agnostic threshold seeds `rice` and `mango` only when neither of
///   their own keys is stored. `soil` and `corn` never read the legacy key.
/// - Reads are issued concurrently; each key falls back to its default on its own.
pub(super) async fn load<S: KeyValueStore>(storage: &S) -> PreferenceSet {
    let (rice, mango, soil, corn, legacy, auto_save, dark, unit, language) = tokio::join!(
        read_key(storage, keys::threshold(Crop::Rice)),
        read_key(storage, keys::threshold(Crop::Mango)),
        read_key(storage, keys::threshold(Crop::Soil)),
        read_key(storage, keys::threshold(Crop::Corn)),
        read_key(storage, keys::LEGACY_THRESHOLD),
        read_key(storage, keys::AUTO_SAVE_PHOTOS),
        read_key(storage, keys::DARK_MODE),
        read_key(storage, keys::TEMPERATURE_UNIT),
        read_key(storage, keys::LANGUAGE),
    );

    let mut prefs = PreferenceSet::default();

    let migrate_legacy = rice.is_none() && mango.is_none() && legacy.is_some();
    let per_crop = [
        (Crop::Rice, rice),
        (Crop::Mango, mango),
        (Crop::Soil, soil),
        (Crop::Corn, corn),
    ];
    for (crop, raw) in per_crop {
        if let Some(v) = parse_threshold(keys::threshold(crop), raw.as_deref()) {
            prefs.confidence_thresholds.insert(crop, v);
        }
    }
    if migrate_legacy
        && let Some(v) = parse_threshold(keys::LEGACY_THRESHOLD, legacy.as_deref())
    {
        tracing::info!(value = v, "seeding rice and mango thresholds from legacy threshold");
        prefs.confidence_thresholds.insert(Crop::Rice, v);
        prefs.confidence_thresholds.insert(Crop::Mango, v);
    }

    if let Some(v) = parse_with(keys::AUTO_SAVE_PHOTOS, auto_save.as_deref(), parse_bool) {
        prefs.auto_save_photos = v;
    }
    if let Some(v) = parse_with(keys::DARK_MODE, dark.as_deref(), parse_bool) {
        prefs.dark_mode = v;
    }
    if let Some(v) = parse_with(
        keys::TEMPERATURE_UNIT,
        unit.as_deref(),
        TemperatureUnit::from_config_key,
    ) {
        prefs.temperature_unit = v;
    }
    if let Some(v) = parse_with(keys::LANGUAGE, language.as_deref(), Language::from_config_key) {
        prefs.language = v;
    }

    prefs.active_translations = i18n::static_translations(prefs.language);
    prefs.translation_source = TranslationSource::Static;
    prefs.is_loading_translations = false;
    prefs
}
