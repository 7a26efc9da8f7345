//! Translation map and lookup utilities.

use std::collections::HashMap;

/// Translation map: dot-notation key -> translated string.
pub type TranslationMap = HashMap<String, String>;

/// Active string for `key`, if the map carries it.
#[must_use]
pub fn translate(key: &str, translations: &TranslationMap) -> Option<String> {
    translations.get(key).cloned()
}

/// What: Resolve a UI string, degrading to English and then to the key.
///
/// Inputs:
/// - `key`: Dot-notation key (e.g. `scan.no_detection`)
/// - `active`: Map for the selected language
/// - `english`: Static English map
///
/// Output:
/// - The active string, else the English one, else `key` unchanged.
pub fn translate_with_fallback(key: &str, active: &TranslationMap, english: &TranslationMap) -> String {
    if let Some(text) = active.get(key) {
        return text.clone();
    }
    english.get(key).map_or_else(
        || {
            tracing::debug!(key, "unknown UI string key");
            key.to_string()
        },
        |text| {
            tracing::debug!(key, "UI string missing from active map; using English");
            text.clone()
        },
    )
}

/// What: Zip a live translation batch back onto its keys.
///
/// Inputs:
/// - `keys`: Keys in the order their source texts were sent
/// - `translated`: Translator output in the same order
///
/// Output:
/// - `Some(TranslationMap)` with every key; `None` when the batch is incomplete
///
/// Details:
/// - A length mismatch or any blank entry rejects the whole batch so callers never
///   show a mix of translated and missing strings.
#[must_use]
pub fn assemble_translations(keys: &[&str], translated: Vec<String>) -> Option<TranslationMap> {
    if keys.len() != translated.len() {
        tracing::debug!(
            expected = keys.len(),
            got = translated.len(),
            "translation batch length mismatch"
        );
        return None;
    }
    if let Some(idx) = translated.iter().position(|t| t.trim().is_empty()) {
        tracing::debug!(key = keys[idx], "translation batch returned a blank entry");
        return None;
    }
    Some(
        keys.iter()
            .map(|k| (*k).to_string())
            .zip(translated)
            .collect(),
    )
}
