//! Key-value persistence for preferences.
//!
//! Values are stored as strings (`"0.7"`, `"true"`, `"tl"`). The store treats every
//! backend failure as recoverable: reads fall back to defaults and writes go through
//! a [`WriteQueue`] that retries in the background.

mod file;
mod memory;
mod writer;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use writer::{DeadLetter, RetryPolicy, WriteQueue};

use std::future::Future;

use crate::Result;

/// Storage keys. Names match what earlier releases of the app wrote.
pub mod keys {
    use crate::state::Crop;

    /// Crop-agnostic threshold written before per-crop thresholds existed.
    pub const LEGACY_THRESHOLD: &str = "confidenceThreshold";
    /// Auto-save captured photos.
    pub const AUTO_SAVE_PHOTOS: &str = "autoSavePhotos";
    /// Dark UI theme.
    pub const DARK_MODE: &str = "darkMode";
    /// Temperature unit for weather readings.
    pub const TEMPERATURE_UNIT: &str = "temperatureUnit";
    /// UI language tag.
    pub const LANGUAGE: &str = "language";

    /// What: Storage key for a crop's confidence threshold.
    ///
    /// Inputs:
    /// - `crop`: Crop whose threshold is stored.
    ///
    /// Output:
    /// - `confidenceThreshold_{crop}`.
    #[must_use]
    pub const fn threshold(crop: Crop) -> &'static str {
        match crop {
            Crop::Rice => "confidenceThreshold_rice",
            Crop::Mango => "confidenceThreshold_mango",
            Crop::Soil => "confidenceThreshold_soil",
            Crop::Corn => "confidenceThreshold_corn",
        }
    }
}

/// String-keyed, string-valued asynchronous storage.
pub trait KeyValueStore: Send + Sync + 'static {
    /// What: Read a stored value.
    ///
    /// Output:
    /// - `Ok(Some(value))` when present, `Ok(None)` when absent.
    ///
    /// # Errors
    /// - Backend I/O failures.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// What: Store a value, replacing any previous one.
    ///
    /// # Errors
    /// - Backend I/O failures.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}
