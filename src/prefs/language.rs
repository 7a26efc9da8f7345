//! Deriving active translations for a non-default language.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;

use crate::i18n::{self, TranslationMap};
use crate::state::{Language, PreferenceSet, TranslationSource};
use crate::translate::Translator;

/// What: Produce a complete translation map for `target`.
///
/// Inputs:
/// - `translator`: Live translation service.
/// - `target`: Language to translate into.
/// - `timeout`: Upper bound for the whole batch.
///
/// Output:
/// - `(map, TranslationSource::Live)` when the batch succeeds and is complete;
///   `(static table, TranslationSource::Static)` otherwise.
///
/// Details:
/// - Sends the English column of the static table in declared order as one batch.
/// - Errors, timeouts, length mismatches and blank entries all fall back to the
///   static table for `target`; a partial result is never returned.
pub(super) async fn derive<T: Translator>(
    translator: &T,
    target: Language,
    timeout: Duration,
) -> (TranslationMap, TranslationSource) {
    if target == Language::En {
        return (i18n::static_translations(Language::En), TranslationSource::Static);
    }
    let (keys, texts): (Vec<&str>, Vec<String>) = i18n::english_rows()
        .into_iter()
        .map(|(key, en)| (key, en.to_string()))
        .unzip();

    match tokio::time::timeout(timeout, translator.translate_batch(&texts, target)).await {
        Ok(Ok(translated)) => {
            if let Some(map) = i18n::assemble_translations(&keys, translated) {
                return (map, TranslationSource::Live);
            }
            tracing::warn!(language = %target, "incomplete translation batch; using static table");
        }
        Ok(Err(e)) => {
            tracing::warn!(language = %target, error = %e, "live translation failed; using static table");
        }
        Err(_) => {
            tracing::warn!(
                language = %target,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                "live translation timed out; using static table"
            );
        }
    }
    (i18n::static_translations(target), TranslationSource::Static)
}

/// In-flight translation batch for one `set_language` call.
///
/// Commits through [`PendingBatch::commit`]. If the owning future is dropped before
/// that (caller timeout, `select!`, aborted task), `Drop` installs the static table
/// for `target` and clears the loading flag, provided no newer call took over.
pub(super) struct PendingBatch<'a> {
    /// Store state.
    state: &'a watch::Sender<PreferenceSet>,
    /// Store-wide generation counter.
    generation: &'a AtomicU64,
    /// Generation taken by this call.
    issued: u64,
    /// Language being translated to.
    target: Language,
    /// Set once `commit` ran.
    settled: bool,
}

impl<'a> PendingBatch<'a> {
    /// Guard for a batch issued under generation `issued`.
    pub(super) const fn new(
        state: &'a watch::Sender<PreferenceSet>,
        generation: &'a AtomicU64,
        issued: u64,
        target: Language,
    ) -> Self {
        Self {
            state,
            generation,
            issued,
            target,
            settled: false,
        }
    }

    /// What: Install `translations` unless a newer call superseded this batch.
    ///
    /// Output:
    /// - `true` when the state was updated.
    pub(super) fn commit(mut self, translations: TranslationMap, source: TranslationSource) -> bool {
        self.settled = true;
        self.apply(translations, source)
    }

    /// Write the result and clear the loading flag if `issued` is still current.
    fn apply(&self, translations: TranslationMap, source: TranslationSource) -> bool {
        self.state.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != self.issued {
                return false;
            }
            s.active_translations = translations;
            s.translation_source = source;
            s.is_loading_translations = false;
            true
        })
    }
}

impl Drop for PendingBatch<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if self.apply(i18n::static_translations(self.target), TranslationSource::Static) {
            tracing::warn!(
                language = %self.target,
                "translation batch cancelled; using static table"
            );
        }
    }
}
