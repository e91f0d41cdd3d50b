//! Result types shared by the per-chunk pipelines.

use crate::error::ChunkError;
use serde::{Deserialize, Serialize};

/// The outcome of applying one transform to one chunk.
///
/// Exactly one outcome exists per input chunk, at the same position the
/// chunk held in its batch. The three states are:
///
/// | `value`   | `error`  | Meaning                                        |
/// |-----------|----------|------------------------------------------------|
/// | `Some(_)` | `None`   | transform produced a result                    |
/// | `None`    | `None`   | transform ran fine but had nothing to report   |
/// | `None`    | `Some(_)`| transform failed; batch continued without it   |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkOutcome<T> {
    /// Index of the chunk this outcome belongs to.
    pub chunk_index: usize,
    /// The transform's result, when it produced one.
    pub value: Option<T>,
    /// The recorded failure, when the transform failed.
    pub error: Option<ChunkError>,
    /// Wall-clock time spent on this chunk, including retries.
    pub duration_ms: u64,
}

impl<T> ChunkOutcome<T> {
    /// True when the transform ran without a recorded failure.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate statistics for one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Chunks in the batch.
    pub total_chunks: usize,
    /// Chunks whose transform completed without a recorded error.
    pub processed_chunks: usize,
    /// Chunks whose transform failed after retries.
    pub failed_chunks: usize,
    /// Total wall-clock time for the run.
    pub total_duration_ms: u64,
}

impl RunStats {
    /// Summarise a batch of outcomes.
    pub fn from_outcomes<T>(outcomes: &[ChunkOutcome<T>], total_duration_ms: u64) -> Self {
        let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
        Self {
            total_chunks: outcomes.len(),
            processed_chunks: outcomes.len() - failed,
            failed_chunks: failed,
            total_duration_ms,
        }
    }
}
