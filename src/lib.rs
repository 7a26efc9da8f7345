//! Library entry for Leafscan exposing the preferences store and its collaborators.
//!
//! The crate is organised around one long-lived service, [`prefs::PreferencesStore`],
//! which hydrates user preferences from a [`storage::KeyValueStore`], persists every
//! mutation through a background write queue and keeps the active UI strings in sync
//! with the selected language using a [`translate::Translator`] with a static fallback.

pub mod i18n;
pub mod paths;
pub mod prefs;
pub mod state;
pub mod storage;
pub mod translate;
pub mod util;

/// Boxed error used by the storage and translation collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias shared by the collaborator traits.
pub type Result<T> = std::result::Result<T, BoxError>;
