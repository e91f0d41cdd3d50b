//! Model interaction: drive the injected provider with deadline, retry,
//! and backoff.
//!
//! This module is intentionally thin — all prompt engineering lives in
//! [`crate::prompts`] so it can be changed without touching retry or
//! error-handling logic here.
//!
//! ## Retry Strategy
//!
//! HTTP 429 / 503 errors from model APIs are transient and frequent under
//! concurrent load. Exponential backoff (`retry_backoff_ms * 2^attempt`)
//! avoids thundering-herd: with 500 ms base and 3 retries the wait
//! sequence is 500 ms → 1 s → 2 s, totalling < 4 s of back-off per item.
//! Auth errors are permanent and are not retried.
//!
//! Every call runs under a `tokio::time::timeout` deadline so a stalled
//! connection becomes a retryable failure instead of hanging the batch.

use crate::config::PipelineConfig;
use crate::error::{ChunkError, ProviderError};
use crate::provider::LanguageModel;
use std::sync::Arc;
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, warn};

/// Send a prompt to the model on behalf of chunk `chunk_index`, retrying
/// transient failures.
///
/// Returns the raw response text, or a [`ChunkError`] once retries are
/// exhausted. Never panics and never propagates a [`ProviderError`]
/// upward — callers record the `ChunkError` and move on.
pub(crate) async fn invoke_model(
    model: &Arc<dyn LanguageModel>,
    chunk_index: usize,
    prompt: &str,
    config: &PipelineConfig,
) -> Result<String, ChunkError> {
    let deadline = Duration::from_secs(config.api_timeout_secs);
    let mut last_err: Option<String> = None;
    let mut timed_out = false;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            let backoff = config.retry_backoff_ms * 2u64.pow(attempt - 1);
            warn!(
                "Chunk {}: retry {}/{} after {}ms",
                chunk_index, attempt, config.max_retries, backoff
            );
            sleep(Duration::from_millis(backoff)).await;
        }

        match timeout(deadline, model.invoke(prompt)).await {
            Ok(Ok(response)) => {
                debug!(
                    "Chunk {}: model responded ({} bytes, attempt {})",
                    chunk_index,
                    response.len(),
                    attempt + 1
                );
                return Ok(response);
            }
            Ok(Err(e @ ProviderError::Auth { .. })) => {
                // Retrying a bad credential only burns quota.
                warn!("Chunk {}: auth error, not retrying — {}", chunk_index, e);
                return Err(ChunkError::LlmFailed {
                    chunk: chunk_index,
                    retries: attempt as u8,
                    detail: e.to_string(),
                });
            }
            Ok(Err(e)) => {
                warn!(
                    "Chunk {}: attempt {} failed — {}",
                    chunk_index,
                    attempt + 1,
                    e
                );
                timed_out = false;
                last_err = Some(e.to_string());
            }
            Err(_elapsed) => {
                warn!(
                    "Chunk {}: attempt {} timed out after {}s",
                    chunk_index,
                    attempt + 1,
                    config.api_timeout_secs
                );
                timed_out = true;
                last_err = None;
            }
        }
    }

    if timed_out {
        return Err(ChunkError::Timeout {
            chunk: chunk_index,
            secs: config.api_timeout_secs,
        });
    }

    Err(ChunkError::LlmFailed {
        chunk: chunk_index,
        retries: config.max_retries as u8,
        detail: last_err.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails `failures` times, then answers.
    struct Flaky {
        calls: AtomicUsize,
        failures: usize,
        error: fn() -> ProviderError,
    }

    #[async_trait]
    impl LanguageModel for Flaky {
        async fn invoke(&self, _prompt: &str) -> Result<String, ProviderError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err((self.error)())
            } else {
                Ok("answer".to_string())
            }
        }
    }

    fn fast_config() -> PipelineConfig {
        PipelineConfig::builder()
            .max_retries(3)
            .retry_backoff_ms(1)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn transient_errors_are_retried() {
        let model: Arc<dyn LanguageModel> = Arc::new(Flaky {
            calls: AtomicUsize::new(0),
            failures: 2,
            error: || ProviderError::RateLimited {
                retry_after_secs: None,
            },
        });
        let out = invoke_model(&model, 0, "hi", &fast_config()).await.unwrap();
        assert_eq!(out, "answer");
    }

    #[tokio::test]
    async fn exhausted_retries_become_chunk_error() {
        let model: Arc<dyn LanguageModel> = Arc::new(Flaky {
            calls: AtomicUsize::new(0),
            failures: usize::MAX,
            error: || ProviderError::Network {
                detail: "connection reset".into(),
            },
        });
        let err = invoke_model(&model, 7, "hi", &fast_config())
            .await
            .unwrap_err();
        match err {
            ChunkError::LlmFailed { chunk, retries, .. } => {
                assert_eq!(chunk, 7);
                assert_eq!(retries, 3);
            }
            other => panic!("expected LlmFailed, got {other:?}"),
        }
        // 1 initial + 3 retries
    }

    #[tokio::test]
    async fn auth_errors_are_not_retried() {
        let model = Arc::new(Flaky {
            calls: AtomicUsize::new(0),
            failures: usize::MAX,
            error: || ProviderError::Auth {
                detail: "invalid key".into(),
            },
        });
        let dyn_model: Arc<dyn LanguageModel> = model.clone();
        let err = invoke_model(&dyn_model, 1, "hi", &fast_config())
            .await
            .unwrap_err();
        assert!(matches!(err, ChunkError::LlmFailed { .. }));
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    /// Never completes — exercises the deadline.
    struct Hanging;

    #[async_trait]
    impl LanguageModel for Hanging {
        async fn invoke(&self, _prompt: &str) -> Result<String, ProviderError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn hung_calls_become_timeouts() {
        let model: Arc<dyn LanguageModel> = Arc::new(Hanging);
        let config = PipelineConfig::builder()
            .max_retries(1)
            .retry_backoff_ms(1)
            .api_timeout_secs(2)
            .build()
            .unwrap();
        let err = invoke_model(&model, 4, "hi", &config).await.unwrap_err();
        assert!(matches!(err, ChunkError::Timeout { chunk: 4, secs: 2 }));
    }
}
