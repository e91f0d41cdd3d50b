//! Progress-callback trait for per-chunk pipeline events.
//!
//! Inject an [`Arc<dyn ProgressCallback>`](std::sync::Arc) via
//! [`crate::config::PipelineConfigBuilder::progress_callback`] to receive
//! real-time events as a pipeline processes each chunk.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers
//! can forward events to a channel, a WebSocket, a database record, or a
//! terminal progress bar — without the library knowing anything about how
//! the host application communicates. The trait is `Send + Sync` so it
//! works correctly when chunks are processed concurrently.

/// Called by the per-chunk runner as it processes each chunk.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
///
/// # Thread safety
///
/// With `concurrency > 1`, `on_chunk_start`, `on_chunk_complete`, and
/// `on_chunk_error` may be called concurrently from different tasks.
/// Implementations must protect shared mutable state with appropriate
/// synchronisation primitives (e.g. `Mutex`, `AtomicUsize`).
pub trait ProgressCallback: Send + Sync {
    /// Called once before any chunk is processed.
    fn on_batch_start(&self, total_chunks: usize) {
        let _ = total_chunks;
    }

    /// Called just before a chunk's transform is invoked.
    fn on_chunk_start(&self, chunk_index: usize, total_chunks: usize) {
        let _ = (chunk_index, total_chunks);
    }

    /// Called when a chunk's transform finished without a recorded error.
    ///
    /// `produced` is false when the transform ran fine but yielded no
    /// result for this chunk (e.g. no verifiable claim found).
    fn on_chunk_complete(&self, chunk_index: usize, total_chunks: usize, produced: bool) {
        let _ = (chunk_index, total_chunks, produced);
    }

    /// Called when a chunk's transform failed after retries.
    fn on_chunk_error(&self, chunk_index: usize, total_chunks: usize, error: &str) {
        let _ = (chunk_index, total_chunks, error);
    }

    /// Called once after every chunk has been processed.
    fn on_batch_complete(&self, total_chunks: usize, succeeded: usize) {
        let _ = (total_chunks, succeeded);
    }
}
