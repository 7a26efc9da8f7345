//! Client for the public Google Translate `translate_a/single` endpoint.

use std::future::Future;
use std::time::Duration;

use futures::{StreamExt, TryStreamExt, stream};
use serde_json::Value;

use super::Translator;
use crate::Result;
use crate::state::Language;
use crate::util::percent_encode;

/// Public endpoint used by the mobile app.
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Requests of one batch allowed in flight at once.
pub const MAX_IN_FLIGHT: usize = 5;

/// Translator backed by the keyless `client=gtx` endpoint.
///
/// Each text is sent as its own request; up to [`MAX_IN_FLIGHT`] requests of a batch
/// run concurrently and the batch fails as a whole if any of them fails.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    /// Shared HTTP client (connection pooling enabled by default).
    client: reqwest::Client,
    /// Base URL without query string.
    endpoint: String,
}

impl GoogleTranslator {
    /// What: Build a translator with a per-request timeout.
    ///
    /// Inputs:
    /// - `timeout`: Upper bound for a single HTTP request.
    ///
    /// Output:
    /// - `Ok(GoogleTranslator)` targeting [`DEFAULT_ENDPOINT`].
    ///
    /// # Errors
    /// - Returns `Err` when the HTTP client cannot be constructed (TLS backend failure).
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .timeout(timeout)
            .user_agent(format!("Leafscan/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))?;
        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Point the translator at another base URL (mirrors, local fakes).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// What: Translate one string.
    ///
    /// # Errors
    /// - Network error, non-2xx status, undecodable body or missing segments.
    async fn translate_one(&self, text: &str, target: Language) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        let url = request_url(&self.endpoint, text, target);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {e}"))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("translation endpoint returned HTTP {status}").into());
        }
        let body: Value = resp
            .json()
            .await
            .map_err(|e| format!("Failed to decode translation response: {e}"))?;
        parse_translation(&body)
    }
}

impl Translator for GoogleTranslator {
    async fn translate_batch(&self, texts: &[String], target: Language) -> Result<Vec<String>> {
        tracing::debug!(count = texts.len(), language = %target, "requesting live translation");
        let out =
            translate_bounded(texts, MAX_IN_FLIGHT, |t| self.translate_one(t, target)).await?;
        tracing::info!(count = out.len(), language = %target, "live translation batch completed");
        Ok(out)
    }
}

/// What: Run `translate` over `texts` with at most `limit` calls pending.
///
/// Output:
/// - Results in input order; the first error aborts the rest.
async fn translate_bounded<'a, F, Fut>(
    texts: &'a [String],
    limit: usize,
    translate: F,
) -> Result<Vec<String>>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    let pending: Vec<Fut> = texts.iter().map(String::as_str).map(translate).collect();
    stream::iter(pending)
        .buffered(limit.max(1))
        .try_collect()
        .await
}

/// What: Build the request URL for one text.
///
/// Output:
/// - `{endpoint}?client=gtx&sl=en&tl={target}&dt=t&q={text}` with `text` percent-encoded.
fn request_url(endpoint: &str, text: &str, target: Language) -> String {
    format!(
        "{endpoint}?client=gtx&sl=en&tl={}&dt=t&q={}",
        target.as_config_key(),
        percent_encode(text)
    )
}

/// What: Extract the translated text from a `translate_a/single` response.
///
/// Inputs:
/// - `body`: Decoded JSON; `body[0]` is a list of segments whose first element is translated text.
///
/// Output:
/// - Concatenated translated segments.
///
/// # Errors
/// - Returns `Err` when the segment list is missing or yields no text.
fn parse_translation(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or("malformed translation response: missing segment list")?;
    let text: String = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        return Err("malformed translation response: no translated text".into());
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    #[test]
    /// What: Segments are concatenated in order; null segments are skipped.
    ///
    /// - Input: Response with two text segments and one null segment
    /// - Output: Joined translation
    fn parse_translation_joins_segments() {
        let body = json!([
            [
                ["Pinapataas ng halumigmig ", "High humidity ", null],
                ["ang panganib", "increases risk", null],
                [null, null, "Pinapataas"]
            ],
            null,
            "en"
        ]);
        assert_eq!(
            parse_translation(&body).expect("parse"),
            "Pinapataas ng halumigmig ang panganib"
        );
    }

    #[test]
    /// What: Unexpected payload shapes are errors, not empty strings.
    ///
    /// - Input: Object body, empty segment list, segments without text
    /// - Output: `Err` for each
    fn parse_translation_rejects_malformed() {
        assert!(parse_translation(&json!({"error": "quota"})).is_err());
        assert!(parse_translation(&json!([[]])).is_err());
        assert!(parse_translation(&json!([[[null, "Save"]]])).is_err());
    }

    #[test]
    /// What: Request URL carries the target tag and an encoded query.
    ///
    /// - Input: Text with spaces and a colon, Tagalog target
    /// - Output: Encoded `q` and `tl=tl`
    fn request_url_encodes_text() {
        let url = request_url(DEFAULT_ENDPOINT, "Rain expected: delay", Language::Tl);
        assert_eq!(
            url,
            "https://translate.googleapis.com/translate_a/single?client=gtx&sl=en&tl=tl&dt=t&q=Rain%20expected%3A%20delay"
        );
    }

    #[tokio::test]
    /// What: Blank input short-circuits without a network call.
    ///
    /// - Input: Whitespace text against an unroutable endpoint
    /// - Output: Input returned unchanged
    async fn blank_text_skips_request() {
        let translator = GoogleTranslator::new(Duration::from_millis(50))
            .expect("client")
            .with_endpoint("http://127.0.0.1:9/unused");
        let out = translator
            .translate_one("  ", Language::Tl)
            .await
            .expect("no request made");
        assert_eq!(out, "  ");
    }

    #[tokio::test]
    /// What: A batch never has more than the allowed requests pending and keeps order.
    ///
    /// - Input: 27 texts, each call sleeping briefly while counted as in flight
    /// - Output: Peak concurrency equals `MAX_IN_FLIGHT`; results in input order
    async fn batch_requests_are_bounded_and_ordered() {
        let texts: Vec<String> = (0..27).map(|i| format!("row {i}")).collect();
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        let out = translate_bounded(&texts, MAX_IN_FLIGHT, |t| {
            let in_flight = &in_flight;
            let peak = &peak;
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                let len = u64::try_from(t.len()).unwrap_or(1);
                tokio::time::sleep(Duration::from_millis(2 + len % 3)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok::<_, crate::BoxError>(t.to_uppercase())
            }
        })
        .await
        .expect("batch");

        assert_eq!(peak.load(Ordering::SeqCst), MAX_IN_FLIGHT);
        let expected: Vec<String> = texts.iter().map(|t| t.to_uppercase()).collect();
        assert_eq!(out, expected);
    }

    #[tokio::test]
    /// What: One failing request fails the whole batch.
    ///
    /// - Input: Three texts, the middle one failing
    /// - Output: `Err` carrying the failure
    async fn batch_fails_when_any_request_fails() {
        let texts = vec!["a".to_string(), "fail".to_string(), "c".to_string()];
        let err = translate_bounded(&texts, MAX_IN_FLIGHT, |t| async move {
            if t == "fail" {
                Err::<String, crate::BoxError>("HTTP 429".into())
            } else {
                Ok(t.to_string())
            }
        })
        .await
        .expect_err("must fail");
        assert!(err.to_string().contains("429"));
    }
}
