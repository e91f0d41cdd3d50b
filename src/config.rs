//! Configuration types for the document-assistant pipelines.
//!
//! All pipeline behaviour is controlled through [`PipelineConfig`], built
//! via its [`PipelineConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across pipelines, log them, and diff two runs
//! to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A ten-field constructor is unreadable and breaks on every new field.
//! The builder pattern lets callers set only what they care about and rely
//! on well-documented defaults for the rest.

use crate::error::DocumateError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::sync::Arc;

/// Configuration shared by every pipeline in this crate.
///
/// Built via [`PipelineConfig::builder()`] or using
/// [`PipelineConfig::default()`].
///
/// # Example
/// ```rust
/// use documate::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .chunk_size(800)
///     .chunk_overlap(100)
///     .concurrency(8)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct PipelineConfig {
    /// Target chunk length in characters. Default: 1000.
    ///
    /// Large enough that a chunk carries a few complete sentences of
    /// context for the model, small enough that prompts stay cheap and a
    /// single bad chunk loses little of the document.
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters. Default: 200.
    ///
    /// Overlap keeps sentences that straddle a chunk boundary visible to
    /// at least one complete window. Must be strictly smaller than
    /// `chunk_size` — an overlap that large or larger would re-emit the
    /// same window forever.
    pub chunk_overlap: usize,

    /// Number of concurrent model calls per batch. Default: 4.
    ///
    /// Model APIs are network-bound, not CPU-bound; a handful of in-flight
    /// calls cuts wall-clock time substantially. If you hit rate-limit
    /// errors (`429`), lower this; if the API is fast and generous, raise it.
    pub concurrency: usize,

    /// Maximum retry attempts on a transient model/search failure. Default: 3.
    ///
    /// Most 5xx and timeout errors are transient (overloaded backend,
    /// network blip). Permanent errors (bad API key) are not retried —
    /// they surface as a [`crate::error::ChunkError`] immediately.
    pub max_retries: u32,

    /// Initial retry delay in milliseconds (exponential backoff). Default: 500.
    ///
    /// Doubles after each attempt: 500 ms → 1 s → 2 s. Exponential backoff
    /// avoids the thundering-herd problem where N concurrent workers retry
    /// simultaneously and immediately overwhelm a recovering API endpoint.
    pub retry_backoff_ms: u64,

    /// Per-model-call timeout in seconds. Default: 60.
    ///
    /// External calls can hang indefinitely on a stalled connection; the
    /// deadline converts a hang into a retryable per-item failure.
    pub api_timeout_secs: u64,

    /// Optional per-chunk progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            concurrency: 4,
            max_retries: 3,
            retry_backoff_ms: 500,
            api_timeout_secs: 60,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("chunk_size", &self.chunk_size)
            .field("chunk_overlap", &self.chunk_overlap)
            .field("concurrency", &self.concurrency)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ProgressCallback>"),
            )
            .finish()
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn chunk_size(mut self, n: usize) -> Self {
        self.config.chunk_size = n;
        self
    }

    pub fn chunk_overlap(mut self, n: usize) -> Self {
        self.config.chunk_overlap = n;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n;
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: Arc<dyn ProgressCallback>) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PipelineConfig, DocumateError> {
        let c = &self.config;
        if c.chunk_size == 0 {
            return Err(DocumateError::InvalidConfig(
                "chunk_size must be ≥ 1".into(),
            ));
        }
        if c.chunk_overlap >= c.chunk_size {
            return Err(DocumateError::InvalidConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                c.chunk_overlap, c.chunk_size
            )));
        }
        if c.concurrency == 0 {
            return Err(DocumateError::InvalidConfig(
                "concurrency must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = PipelineConfig::default();
        assert_eq!(c.chunk_size, 1000);
        assert_eq!(c.chunk_overlap, 200);
        assert_eq!(c.concurrency, 4);
        assert_eq!(c.max_retries, 3);
    }

    #[test]
    fn builder_rejects_overlap_not_smaller_than_chunk_size() {
        let err = PipelineConfig::builder()
            .chunk_size(100)
            .chunk_overlap(100)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("chunk_overlap"));
    }

    #[test]
    fn builder_rejects_zero_chunk_size() {
        assert!(PipelineConfig::builder().chunk_size(0).build().is_err());
    }

    #[test]
    fn concurrency_clamped_to_one() {
        let c = PipelineConfig::builder().concurrency(0).build().unwrap();
        assert_eq!(c.concurrency, 1);
    }
}
