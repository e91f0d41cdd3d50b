//! Per-chunk transform runner: bounded concurrent fan-out with ordered,
//! failure-isolated collection.
//!
//! Every per-chunk pipeline (claims, grammar, summaries) funnels through
//! [`run_chunks`]. The runner owns three guarantees the pipelines rely on:
//!
//! 1. **One outcome per chunk.** The output length always equals the input
//!    length, and `output[i]` belongs to `chunks[i]` — consumers re-attach
//!    chunk text by index and must never be off by one.
//! 2. **Failure isolation.** A transform that fails is recorded as an
//!    outcome with `error` set; the batch continues. One bad chunk never
//!    aborts the run.
//! 3. **Bounded concurrency.** Up to `config.concurrency` transforms are
//!    in flight at once via `buffer_unordered`; completion order is
//!    whatever the network gives us, and ordering is restored by a final
//!    sort on chunk index.

use crate::chunk::Chunk;
use crate::config::PipelineConfig;
use crate::error::ChunkError;
use crate::output::ChunkOutcome;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::time::Instant;
use tracing::{debug, warn};

/// Apply `transform` to every chunk, collecting one [`ChunkOutcome`] per
/// chunk in chunk-index order.
///
/// The transform returns:
/// - `Ok(Some(value))` — a result for this chunk
/// - `Ok(None)` — ran fine, nothing to report (e.g. no verifiable claim)
/// - `Err(ChunkError)` — a recorded failure; the batch continues
pub async fn run_chunks<T, F, Fut>(
    chunks: &[Chunk],
    config: &PipelineConfig,
    transform: F,
) -> Vec<ChunkOutcome<T>>
where
    T: Send,
    F: Fn(Chunk) -> Fut,
    Fut: Future<Output = Result<Option<T>, ChunkError>> + Send,
{
    let total = chunks.len();

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    let mut outcomes: Vec<ChunkOutcome<T>> = stream::iter(chunks.iter().cloned().map(|chunk| {
        let transform = &transform;
        let cb = config.progress_callback.as_deref();
        async move {
            let index = chunk.index;
            if let Some(cb) = cb {
                cb.on_chunk_start(index, total);
            }

            let start = Instant::now();
            let outcome = match transform(chunk).await {
                Ok(value) => {
                    if let Some(cb) = cb {
                        cb.on_chunk_complete(index, total, value.is_some());
                    }
                    ChunkOutcome {
                        chunk_index: index,
                        value,
                        error: None,
                        duration_ms: start.elapsed().as_millis() as u64,
                    }
                }
                Err(error) => {
                    warn!("Chunk {} failed: {}", index, error);
                    if let Some(cb) = cb {
                        cb.on_chunk_error(index, total, &error.to_string());
                    }
                    ChunkOutcome {
                        chunk_index: index,
                        value: None,
                        error: Some(error),
                        duration_ms: start.elapsed().as_millis() as u64,
                    }
                }
            };
            outcome
        }
    }))
    .buffer_unordered(config.concurrency)
    .collect()
    .await;

    // Restore chunk order after unordered completion
    outcomes.sort_by_key(|o| o.chunk_index);

    let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
    debug!("Batch complete: {}/{} chunks succeeded", succeeded, total);

    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, succeeded);
    }

    outcomes
}
