//! The preferences store: single authority for reading, migrating, mutating and
//! persisting user preferences.
//!
//! # Model
//!
//! State lives in a `tokio::sync::watch` channel. Every mutation is applied to the
//! in-memory [`PreferenceSet`] synchronously, before any suspension point, so a
//! caller reading right after `set_dark_mode(true)` already sees `true`. Persistence
//! is handed to a [`WriteQueue`] and never awaited by the mutating call.
//!
//! # Language changes
//!
//! `set_language` is the only operation that suspends. Each call takes a new
//! generation number; a translation batch only commits when its generation is still
//! the latest, so an older batch that settles late cannot overwrite newer state.
//!
//! # Errors
//!
//! No operation here returns an error. Read and parse failures fall back to defaults,
//! write failures are retried and dead-lettered, translation failures fall back to
//! the static table. All of them are logged.

mod hydrate;
mod language;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;

use crate::i18n;
use crate::state::{Crop, Language, PreferenceSet, TemperatureUnit, TranslationSource};
use crate::storage::{DeadLetter, KeyValueStore, RetryPolicy, WriteQueue, keys};
use crate::translate::Translator;

/// Environment variable overriding [`StoreConfig::translation_timeout`] (whole seconds).
pub const TRANSLATE_TIMEOUT_ENV: &str = "LEAFSCAN_TRANSLATE_TIMEOUT_SECS";

/// Tunables for a [`PreferencesStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Upper bound for one live translation batch; expiry counts as a failure.
    pub translation_timeout: Duration,
    /// Retry policy for background writes.
    pub write_retry: RetryPolicy,
    /// Entries kept by a caching translator built from this config.
    pub translation_cache_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            translation_timeout: Duration::from_secs(8),
            write_retry: RetryPolicy::default(),
            translation_cache_capacity: 256,
        }
    }
}

impl StoreConfig {
    /// What: Defaults with environment overrides applied.
    ///
    /// Details:
    /// - `LEAFSCAN_TRANSLATE_TIMEOUT_SECS` replaces the translation timeout when it parses
    ///   as a positive integer; other values are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(TRANSLATE_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.translation_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    value = %raw,
                    "ignoring invalid {TRANSLATE_TIMEOUT_ENV}; expected a positive integer"
                ),
            }
        }
        config
    }
}

/// Owner of the process-wide [`PreferenceSet`].
///
/// Construct once, share by `Arc`, and pass explicitly to whichever component needs it.
/// Must be created inside a tokio runtime (it spawns the write worker).
pub struct PreferencesStore<S, T> {
    /// Persistence backend, shared with the write worker.
    storage: Arc<S>,
    /// Live translator for non-English languages.
    translator: T,
    /// Current state and change notification.
    state: watch::Sender<PreferenceSet>,
    /// Bumped on every language change (and on hydration).
    generation: AtomicU64,
    /// Background persistence.
    writes: WriteQueue,
    /// Tunables.
    config: StoreConfig,
}

impl<S: KeyValueStore, T: Translator> PreferencesStore<S, T> {
    /// What: Create a store holding default preferences.
    ///
    /// Inputs:
    /// - `storage`: Persistence backend.
    /// - `translator`: Live translation service.
    /// - `config`: Timeouts and retry settings.
    ///
    /// Output:
    /// - Store in its default state; call [`Self::initialize`] to hydrate it.
    ///
    /// # Panics
    /// - When called outside a tokio runtime.
    pub fn new(storage: Arc<S>, translator: T, config: StoreConfig) -> Self {
        let (state, _) = watch::channel(PreferenceSet::default());
        let writes = WriteQueue::spawn(Arc::clone(&storage), config.write_retry);
        Self {
            storage,
            translator,
            state,
            generation: AtomicU64::new(0),
            writes,
            config,
        }
    }

    /// Snapshot of the current preferences.
    #[must_use]
    pub fn read(&self) -> PreferenceSet {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PreferenceSet> {
        self.state.subscribe()
    }

    /// Tunables this store was built with.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Live translator used for non-English languages.
    #[must_use]
    pub const fn translator(&self) -> &T {
        &self.translator
    }

    /// What: Hydrate preferences from storage, migrating the legacy threshold.
    ///
    /// Details:
    /// - Reads every key concurrently; a failed or unparsable key keeps its default.
    /// - A persisted Tagalog selection activates the static Tagalog table; no live
    ///   translation runs during startup.
    /// - Nothing is written back; the legacy key stays in storage.
    pub async fn initialize(&self) {
        let loaded = hydrate::load(&*self.storage).await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        tracing::info!(
            language = %loaded.language,
            dark_mode = loaded.dark_mode,
            auto_save_photos = loaded.auto_save_photos,
            unit = loaded.temperature_unit.as_config_key(),
            "preferences loaded"
        );
        self.state.send_replace(loaded);
    }

    /// What: Change one crop's confidence threshold.
    ///
    /// Inputs:
    /// - `crop`: Crop to update.
    /// - `value`: New threshold; clamped into `[0.0, 1.0]`.
    ///
    /// Details:
    /// - Non-finite values are rejected (logged, state unchanged).
    /// - The write is persisted in the background under `confidenceThreshold_{crop}`.
    pub fn set_confidence_threshold(&self, crop: Crop, value: f64) {
        if !value.is_finite() {
            tracing::warn!(crop = %crop, value, "rejecting non-finite confidence threshold");
            return;
        }
        let clamped = value.clamp(0.0, 1.0);
        if clamped.to_bits() != value.to_bits() {
            tracing::debug!(crop = %crop, value, clamped, "confidence threshold clamped");
        }
        self.state.send_modify(|s| {
            s.confidence_thresholds.insert(crop, clamped);
        });
        self.writes
            .enqueue(keys::threshold(crop), clamped.to_string());
    }

    /// Toggle saving captured photos to the gallery.
    pub fn set_auto_save_photos(&self, value: bool) {
        self.state.send_modify(|s| s.auto_save_photos = value);
        self.writes.enqueue(keys::AUTO_SAVE_PHOTOS, value.to_string());
    }

    /// Toggle the dark theme.
    pub fn set_dark_mode(&self, value: bool) {
        self.state.send_modify(|s| s.dark_mode = value);
        self.writes.enqueue(keys::DARK_MODE, value.to_string());
    }

    /// Change the unit used for weather readings.
    pub fn set_temperature_unit(&self, unit: TemperatureUnit) {
        self.state.send_modify(|s| s.temperature_unit = unit);
        self.writes
            .enqueue(keys::TEMPERATURE_UNIT, unit.as_config_key());
    }

    /// What: Change the UI language and re-derive the active translations.
    ///
    /// Inputs:
    /// - `language`: New language.
    ///
    /// Details:
    /// - `language` is updated and persisted before the first suspension point.
    /// - English resolves immediately to the static English table.
    /// - Tagalog sets `is_loading_translations`, sends one batch to the translator
    ///   (bounded by the configured timeout) and commits either the live result or the
    ///   complete static Tagalog table.
    /// - A batch superseded by a newer `set_language` call is discarded; the newer call
    ///   owns the loading flag.
    /// - Dropping the returned future mid-batch installs the static table for `language`
    ///   and clears the loading flag, unless a newer call already took over.
    pub async fn set_language(&self, language: Language) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.language = language;
            match language {
                Language::En => {
                    s.active_translations = i18n::static_translations(Language::En);
                    s.translation_source = TranslationSource::Static;
                    s.is_loading_translations = false;
                }
                Language::Tl => s.is_loading_translations = true,
            }
        });
        self.writes.enqueue(keys::LANGUAGE, language.as_config_key());
        if language == Language::En {
            tracing::debug!(generation, "language set to English");
            return;
        }

        let pending =
            language::PendingBatch::new(&self.state, &self.generation, generation, language);
        let (translations, source) =
            language::derive(&self.translator, language, self.config.translation_timeout).await;

        if pending.commit(translations, source) {
            tracing::info!(language = %language, ?source, "active translations updated");
        } else {
            tracing::debug!(generation, "discarding superseded translation batch");
        }
    }

    /// Wait until every queued write has been stored or dead-lettered.
    pub async fn flush(&self) {
        self.writes.flush().await;
    }

    /// Writes that failed every retry; those changes will not survive a restart.
    #[must_use]
    pub fn dead_letters(&self) -> Vec<DeadLetter> {
        self.writes.dead_letters()
    }
}
