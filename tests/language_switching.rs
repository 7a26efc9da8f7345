#![cfg(test)]
// Language switching through the public API.
// - Uses small in-test translators instead of the network.
// - Checks the committed state after each `set_language` call settles.

use std::sync::Arc;
use std::time::Duration;

use leafscan::i18n;
use leafscan::prefs::{PreferencesStore, StoreConfig};
use leafscan::state::{Language, LanguagePhase, TranslationSource};
use leafscan::storage::{MemoryStore, RetryPolicy, keys};
use leafscan::translate::{CachingTranslator, StaticOnly, Translator};

/// Prefixes every string so live output is distinguishable from the static table.
struct Prefixing;

impl Translator for Prefixing {
    async fn translate_batch(
        &self,
        texts: &[String],
        target: Language,
    ) -> leafscan::Result<Vec<String>> {
        Ok(texts.iter().map(|t| format!("[{target}] {t}")).collect())
    }
}

/// Never answers within any reasonable timeout.
struct Stalled;

impl Translator for Stalled {
    async fn translate_batch(
        &self,
        _texts: &[String],
        _target: Language,
    ) -> leafscan::Result<Vec<String>> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err("unreachable".into())
    }
}

fn config() -> StoreConfig {
    StoreConfig {
        translation_timeout: Duration::from_millis(50),
        write_retry: RetryPolicy {
            attempts: 1,
            backoff: Duration::from_millis(1),
        },
        translation_cache_capacity: 64,
    }
}

#[tokio::test]
/// What: Live translations are committed for Tagalog and replaced by English on switch back.
///
/// - Input: `set_language(tl)` then `set_language(en)` with a working translator
/// - Output: Live prefixed strings, then the static English table; language persisted
async fn live_then_english() {
    let storage = Arc::new(MemoryStore::new());
    let store = PreferencesStore::new(Arc::clone(&storage), Prefixing, config());
    store.initialize().await;

    store.set_language(Language::Tl).await;
    let prefs = store.read();
    assert_eq!(prefs.translation_source, TranslationSource::Live);
    assert_eq!(prefs.text("settings.language"), "[tl] Language");
    assert_eq!(
        prefs.phase(),
        LanguagePhase::Idle {
            language: Language::Tl,
            source: TranslationSource::Live
        }
    );

    store.set_language(Language::En).await;
    store.flush().await;
    let prefs = store.read();
    assert_eq!(prefs.active_translations, i18n::static_translations(Language::En));
    assert_eq!(storage.value(keys::LANGUAGE), Some("en".to_string()));
}

#[tokio::test]
/// What: Disabled live translation yields the complete static Tagalog table.
///
/// - Input: `StaticOnly` translator, `set_language(tl)`
/// - Output: Static Tagalog map with the same key set as English
async fn offline_uses_static_tagalog() {
    let store = PreferencesStore::new(Arc::new(MemoryStore::new()), StaticOnly, config());
    store.initialize().await;

    store.set_language(Language::Tl).await;
    let prefs = store.read();
    assert_eq!(prefs.active_translations, i18n::static_translations(Language::Tl));
    assert_eq!(prefs.translation_source, TranslationSource::Static);
    assert!(!prefs.is_loading_translations);
}

#[tokio::test]
/// What: A stalled service is cut off by the configured timeout.
///
/// - Input: Translator that never answers, 50ms timeout
/// - Output: Call returns with the static Tagalog table and the loading flag cleared
async fn stalled_service_times_out() {
    let store = PreferencesStore::new(Arc::new(MemoryStore::new()), Stalled, config());
    store.initialize().await;

    tokio::time::timeout(Duration::from_secs(5), store.set_language(Language::Tl))
        .await
        .expect("set_language must not hang past the translation timeout");
    let prefs = store.read();
    assert_eq!(prefs.language, Language::Tl);
    assert_eq!(prefs.translation_source, TranslationSource::Static);
    assert_eq!(prefs.text("settings.language"), "Wika");
    assert!(!prefs.is_loading_translations);
}

#[tokio::test]
/// What: Switching back to Tagalog a second time is served from the cache.
///
/// - Input: Caching translator; tl, en, tl
/// - Output: Same live map both times; cache holds one entry per English string
async fn repeated_switch_hits_cache() {
    let translator = CachingTranslator::new(Prefixing, 64);
    let store = PreferencesStore::new(Arc::new(MemoryStore::new()), translator, config());
    store.initialize().await;

    store.set_language(Language::Tl).await;
    let first = store.read().active_translations;
    store.set_language(Language::En).await;
    store.set_language(Language::Tl).await;
    let second = store.read().active_translations;

    assert_eq!(first, second);
    assert_eq!(store.translator().cached_len(), i18n::english_rows().len());
}
