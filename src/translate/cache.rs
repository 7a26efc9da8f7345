//! LRU cache in front of a live translator.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use super::Translator;
use crate::Result;
use crate::state::Language;

/// Cache key: target language and English source text.
type CacheKey = (Language, String);

/// Wraps a [`Translator`] and remembers successful translations.
///
/// Only texts missing from the cache are forwarded, as one smaller batch.
/// Failed batches are never cached, so a later call retries them.
#[derive(Debug)]
pub struct CachingTranslator<T> {
    /// Wrapped translator.
    inner: T,
    /// Translations keyed by target and source text.
    cache: Mutex<LruCache<CacheKey, String>>,
}

impl<T: Translator> CachingTranslator<T> {
    /// What: Wrap `inner` with a cache holding up to `capacity` entries.
    ///
    /// Details:
    /// - A capacity of zero is treated as one.
    pub fn new(inner: T, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of cached translations.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Wrapped translator.
    #[must_use]
    pub const fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Translator> Translator for CachingTranslator<T> {
    async fn translate_batch(&self, texts: &[String], target: Language) -> Result<Vec<String>> {
        let mut out: Vec<Option<String>> = {
            let mut cache = self
                .cache
                .lock()
                .map_err(|_| "translation cache mutex poisoned")?;
            texts
                .iter()
                .map(|t| cache.get(&(target, t.clone())).cloned())
                .collect()
        };
        let missing: Vec<usize> = out
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.is_none().then_some(i))
            .collect();
        if missing.is_empty() {
            tracing::debug!(count = texts.len(), language = %target, "translation batch served from cache");
        } else {
            let pending: Vec<String> = missing.iter().map(|&i| texts[i].clone()).collect();
            let fetched = self.inner.translate_batch(&pending, target).await?;
            if fetched.len() != pending.len() {
                return Err(format!(
                    "translator returned {} strings for {} inputs",
                    fetched.len(),
                    pending.len()
                )
                .into());
            }
            let mut cache = self
                .cache
                .lock()
                .map_err(|_| "translation cache mutex poisoned")?;
            for (&i, translated) in missing.iter().zip(fetched) {
                cache.put((target, texts[i].clone()), translated.clone());
                out[i] = Some(translated);
            }
        }
        Ok(out.into_iter().map(Option::unwrap_or_default).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Counts forwarded texts and optionally fails.
    #[derive(Default)]
    struct Counting {
        /// Texts forwarded so far.
        forwarded: AtomicUsize,
        /// Fail every call.
        fail: bool,
    }

    impl Translator for Counting {
        async fn translate_batch(&self, texts: &[String], _target: Language) -> Result<Vec<String>> {
            self.forwarded.fetch_add(texts.len(), Ordering::SeqCst);
            if self.fail {
                return Err("offline".into());
            }
            Ok(texts.iter().map(|t| format!("tl:{t}")).collect())
        }
    }

    fn batch(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    /// What: Only uncached texts are forwarded and order is preserved.
    ///
    /// - Input: Two overlapping batches
    /// - Output: Second call forwards only the new text; results aligned with inputs
    async fn cache_forwards_only_misses() {
        let translator = CachingTranslator::new(Counting::default(), 16);
        let first = translator
            .translate_batch(&batch(&["Save", "Cancel"]), Language::Tl)
            .await
            .expect("first");
        assert_eq!(first, batch(&["tl:Save", "tl:Cancel"]));

        let second = translator
            .translate_batch(&batch(&["Cancel", "Try Again", "Save"]), Language::Tl)
            .await
            .expect("second");
        assert_eq!(second, batch(&["tl:Cancel", "tl:Try Again", "tl:Save"]));
        assert_eq!(translator.inner().forwarded.load(Ordering::SeqCst), 3);
        assert_eq!(translator.cached_len(), 3);
    }

    #[tokio::test]
    /// What: Failures propagate and leave the cache empty.
    ///
    /// - Input: Always-failing inner translator
    /// - Output: `Err`; nothing cached
    async fn cache_does_not_store_failures() {
        let translator = CachingTranslator::new(
            Counting {
                fail: true,
                ..Counting::default()
            },
            16,
        );
        assert!(
            translator
                .translate_batch(&batch(&["Save"]), Language::Tl)
                .await
                .is_err()
        );
        assert_eq!(translator.cached_len(), 0);
    }

    #[tokio::test]
    /// What: Capacity bounds the cache with LRU eviction.
    ///
    /// - Input: Capacity 1, two distinct texts then the first again
    /// - Output: First text forwarded twice
    async fn cache_evicts_least_recent() {
        let translator = CachingTranslator::new(Counting::default(), 1);
        for text in ["Save", "Cancel", "Save"] {
            translator
                .translate_batch(&batch(&[text]), Language::Tl)
                .await
                .expect("translate");
        }
        assert_eq!(translator.inner().forwarded.load(Ordering::SeqCst), 3);
        assert_eq!(translator.cached_len(), 1);
    }
}
