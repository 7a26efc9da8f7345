//! Live text translation.
//!
//! A [`Translator`] turns an ordered batch of English strings into the same number
//! of strings in a target language. Callers treat any error as a signal to fall
//! back to the static table; implementations never need to return partial output.

mod cache;
mod google;

pub use cache::CachingTranslator;
pub use google::{DEFAULT_ENDPOINT, GoogleTranslator, MAX_IN_FLIGHT};

use std::future::Future;

use crate::state::Language;
use crate::{BoxError, Result};

/// Batch text translation service.
pub trait Translator: Send + Sync + 'static {
    /// What: Translate English `texts` into `target`.
    ///
    /// Output:
    /// - Translations in the same order and of the same length as `texts`.
    ///
    /// # Errors
    /// - Network failures, non-success responses or malformed payloads.
    fn translate_batch(
        &self,
        texts: &[String],
        target: Language,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// What: Translate a single string.
    ///
    /// # Errors
    /// - Same as [`Translator::translate_batch`], plus an empty response.
    fn translate_text(
        &self,
        text: &str,
        target: Language,
    ) -> impl Future<Output = Result<String>> + Send {
        let batch = vec![text.to_string()];
        async move {
            let mut out = self.translate_batch(&batch, target).await?;
            out.pop()
                .ok_or_else(|| BoxError::from("translator returned an empty batch"))
        }
    }
}

/// Translator that never reaches the network; every batch fails so callers use the static table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticOnly;

impl Translator for StaticOnly {
    async fn translate_batch(&self, _texts: &[String], target: Language) -> Result<Vec<String>> {
        Err(format!("live translation to '{target}' is disabled").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Uppercases its input; enough to observe ordering.
    struct Upper;

    impl Translator for Upper {
        async fn translate_batch(&self, texts: &[String], _target: Language) -> Result<Vec<String>> {
            Ok(texts.iter().map(|t| t.to_uppercase()).collect())
        }
    }

    #[tokio::test]
    /// What: `translate_text` is the single-item case of the batch call.
    ///
    /// - Input: One string through an uppercasing translator
    /// - Output: The uppercased string
    async fn translate_text_uses_batch() {
        let out = Upper.translate_text("save", Language::Tl).await.expect("translate");
        assert_eq!(out, "SAVE");
    }

    #[tokio::test]
    /// What: `StaticOnly` always fails.
    ///
    /// - Input: Any batch
    /// - Output: `Err` mentioning the target tag
    async fn static_only_always_fails() {
        let err = StaticOnly
            .translate_batch(&["Save".to_string()], Language::Tl)
            .await
            .expect_err("must fail");
        assert!(err.to_string().contains("'tl'"));
    }
}
