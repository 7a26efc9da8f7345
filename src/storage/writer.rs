//! Background write queue with bounded retry.
//!
//! Mutations must never wait on storage, so every write is handed to a single
//! worker task over an unbounded channel. The worker applies writes in order,
//! retries failures with exponential backoff plus jitter and records writes that
//! still fail as dead letters.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::RngExt;
use tokio::sync::{mpsc, oneshot};

use super::KeyValueStore;

/// Retry settings for background writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per write, including the first one (at least 1).
    pub attempts: u32,
    /// Delay before the second attempt; doubled for each further attempt.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// What: Delay before retrying after `attempt` failed attempts.
    ///
    /// Inputs:
    /// - `attempt`: Number of attempts already made (1-based).
    ///
    /// Output:
    /// - `backoff * 2^(attempt-1)` plus up to half of `backoff` as random jitter.
    fn delay_after(&self, attempt: u32) -> Duration {
        let base = self
            .backoff
            .saturating_mul(1_u32 << attempt.saturating_sub(1).min(10));
        let jitter_cap = u64::try_from(self.backoff.as_millis() / 2).unwrap_or(u64::MAX);
        let jitter_ms = if jitter_cap == 0 {
            0
        } else {
            rand::rng().random_range(0..=jitter_cap)
        };
        base + Duration::from_millis(jitter_ms)
    }
}

/// A write that exhausted its retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadLetter {
    /// Storage key.
    pub key: String,
    /// Value that could not be stored.
    pub value: String,
    /// Attempts made.
    pub attempts: u32,
    /// Error from the last attempt.
    pub error: String,
}

/// Commands consumed by the worker.
enum WriteCommand {
    /// Persist `value` under `key`.
    Write {
        /// Storage key.
        key: String,
        /// Serialized value.
        value: String,
    },
    /// Signal once every previously queued write has been handled.
    Flush(oneshot::Sender<()>),
}

/// Handle for enqueueing writes to a background worker.
#[derive(Debug, Clone)]
pub struct WriteQueue {
    /// Channel into the worker.
    tx: mpsc::UnboundedSender<WriteCommand>,
    /// Writes that failed every attempt.
    dead_letters: Arc<Mutex<Vec<DeadLetter>>>,
}

impl std::fmt::Debug for WriteCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Write { key, .. } => f.debug_struct("Write").field("key", key).finish(),
            Self::Flush(_) => f.write_str("Flush"),
        }
    }
}

impl WriteQueue {
    /// What: Spawn the write worker for `store`.
    ///
    /// Inputs:
    /// - `store`: Backend that receives the writes.
    /// - `policy`: Retry settings.
    ///
    /// Output:
    /// - Handle used to enqueue and flush writes.
    ///
    /// # Panics
    /// - When called outside a tokio runtime (from `tokio::spawn`).
    ///
    /// Details:
    /// - The worker ends once every handle has been dropped.
    pub fn spawn<S: KeyValueStore>(store: Arc<S>, policy: RetryPolicy) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteCommand>();
        let dead_letters = Arc::new(Mutex::new(Vec::new()));
        let letters = Arc::clone(&dead_letters);
        tokio::spawn(async move {
            while let Some(cmd) = rx.recv().await {
                match cmd {
                    WriteCommand::Write { key, value } => {
                        if let Some(letter) = write_with_retry(&*store, policy, key, value).await
                            && let Ok(mut guard) = letters.lock()
                        {
                            guard.push(letter);
                        }
                    }
                    WriteCommand::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            tracing::debug!("preference write worker stopped");
        });
        Self { tx, dead_letters }
    }

    /// What: Queue a write without waiting for it.
    ///
    /// Inputs:
    /// - `key`: Storage key.
    /// - `value`: Serialized value.
    ///
    /// Details:
    /// - If the worker is gone (runtime shutting down) the write is logged and dropped.
    pub fn enqueue(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if let Err(e) = self.tx.send(WriteCommand::Write {
            key: key.clone(),
            value: value.into(),
        }) {
            tracing::warn!(key = %key, error = %e, "preference write worker unavailable; write dropped");
        }
    }

    /// Wait until every write queued before this call has succeeded or been dead-lettered.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(WriteCommand::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }

    /// Writes that failed every attempt so far.
    #[must_use]
    pub fn dead_letters(&self) -> Vec<DeadLetter> {
        self.dead_letters
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// What: Apply one write, retrying per `policy`.
///
/// Output:
/// - `None` on success; `Some(DeadLetter)` when every attempt failed.
async fn write_with_retry<S: KeyValueStore>(
    store: &S,
    policy: RetryPolicy,
    key: String,
    value: String,
) -> Option<DeadLetter> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match store.set(&key, &value).await {
            Ok(()) => {
                if attempt > 1 {
                    tracing::info!(key = %key, attempt, "preference write succeeded after retry");
                } else {
                    tracing::trace!(key = %key, "preference write stored");
                }
                return None;
            }
            Err(e) if attempt < attempts => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    key = %key,
                    attempt,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "preference write failed; retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                tracing::error!(
                    key = %key,
                    attempts,
                    error = %e,
                    "preference write failed permanently; change will not survive a restart"
                );
                return Some(DeadLetter {
                    key,
                    value,
                    attempts,
                    error: e.to_string(),
                });
            }
        }
    }
}
