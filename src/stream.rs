//! Streaming per-chunk API: emit outcomes as they complete.
//!
//! ## Why stream?
//!
//! Large documents take minutes of model time. A stream-based API lets
//! callers display partial results immediately or write findings to disk
//! incrementally instead of buffering a whole report in memory.
//!
//! Unlike the eager [`crate::runner::run_chunks`], which returns only
//! after every chunk finishes, [`stream_chunks`] yields each
//! [`ChunkOutcome`] the moment its transform completes. Outcomes arrive
//! in **completion order**, not chunk order — sort by `chunk_index` if
//! order matters.

use crate::chunk::Chunk;
use crate::config::PipelineConfig;
use crate::error::ChunkError;
use crate::output::ChunkOutcome;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;
use tokio_stream::Stream;
use tracing::warn;

/// A boxed stream of chunk outcomes.
pub type OutcomeStream<T> = Pin<Box<dyn Stream<Item = ChunkOutcome<T>> + Send>>;

/// Apply `transform` to every chunk with bounded concurrency, yielding
/// each outcome as it completes.
///
/// Exactly one outcome is emitted per input chunk; failed transforms are
/// emitted with `error` set rather than terminating the stream.
pub fn stream_chunks<T, F, Fut>(
    chunks: Vec<Chunk>,
    config: &PipelineConfig,
    transform: F,
) -> OutcomeStream<T>
where
    T: Send + 'static,
    F: Fn(Chunk) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<T>, ChunkError>> + Send + 'static,
{
    let concurrency = config.concurrency;

    let s = stream::iter(chunks.into_iter().map(move |chunk| {
        let index = chunk.index;
        let fut = transform(chunk);
        async move {
            let start = Instant::now();
            match fut.await {
                Ok(value) => ChunkOutcome {
                    chunk_index: index,
                    value,
                    error: None,
                    duration_ms: start.elapsed().as_millis() as u64,
                },
                Err(error) => {
                    warn!("Chunk {} failed: {}", index, error);
                    ChunkOutcome {
                        chunk_index: index,
                        value: None,
                        error: Some(error),
                        duration_ms: start.elapsed().as_millis() as u64,
                    }
                }
            }
        }
    }))
    .buffer_unordered(concurrency);

    Box::pin(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn chunks(n: usize) -> Vec<Chunk> {
        (0..n)
            .map(|i| Chunk {
                index: i,
                text: format!("chunk {i}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn yields_one_outcome_per_chunk() {
        let config = PipelineConfig::default();
        let mut stream = stream_chunks(chunks(5), &config, |c| async move {
            Ok::<_, ChunkError>(Some(c.index * 10))
        });

        let mut seen = Vec::new();
        while let Some(outcome) = stream.next().await {
            seen.push(outcome);
        }
        assert_eq!(seen.len(), 5);

        seen.sort_by_key(|o| o.chunk_index);
        for (i, o) in seen.iter().enumerate() {
            assert_eq!(o.value, Some(i * 10));
        }
    }

    #[tokio::test]
    async fn failures_are_emitted_not_fatal() {
        let config = PipelineConfig::default();
        let outcomes: Vec<_> = stream_chunks(chunks(3), &config, |c| async move {
            if c.index == 1 {
                Err(ChunkError::Timeout { chunk: 1, secs: 5 })
            } else {
                Ok(Some(()))
            }
        })
        .collect()
        .await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes.iter().filter(|o| o.error.is_some()).count(), 1);
    }
}
