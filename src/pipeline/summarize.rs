//! Map-reduce summarisation: summarise each chunk independently, then
//! combine the partial summaries into one document summary.
//!
//! The map half runs through the per-chunk runner, so a failed chunk
//! costs its own partial summary and nothing else. The reduce half sees
//! only the surviving partials, joined in chunk order so the combined
//! summary follows the document. If *every* chunk failed there is nothing
//! to reduce and the run is reported as fatal — an empty summary would be
//! indistinguishable from an empty document.

use crate::chunk::Chunk;
use crate::config::PipelineConfig;
use crate::error::DocumateError;
use crate::output::RunStats;
use crate::pipeline::llm::invoke_model;
use crate::prompts;
use crate::provider::LanguageModel;
use crate::runner::run_chunks;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// A document summary plus run accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// The combined document summary.
    pub text: String,
    pub stats: RunStats,
}

/// Summarise pre-split chunks map-reduce style.
///
/// # Errors
/// - [`DocumateError::AllChunksFailed`] — no chunk produced a partial
///   summary
/// - [`DocumateError::LlmFailed`] — the combining call exhausted its
///   retries
pub async fn summarize(
    model: &Arc<dyn LanguageModel>,
    chunks: &[Chunk],
    config: &PipelineConfig,
) -> Result<Summary, DocumateError> {
    if chunks.is_empty() {
        return Err(DocumateError::Internal(
            "cannot summarise zero chunks".to_string(),
        ));
    }

    let start = Instant::now();
    info!("Summarise: mapping {} chunks", chunks.len());

    let outcomes = run_chunks(chunks, config, |chunk| {
        let model = Arc::clone(model);
        async move {
            let response =
                invoke_model(&model, chunk.index, &prompts::summarize_chunk_prompt(&chunk.text), config)
                    .await?;
            Ok(Some(response.trim().to_string()))
        }
    })
    .await;

    let first_error = outcomes
        .iter()
        .find_map(|o| o.error.as_ref())
        .map(|e| e.to_string());

    let partials: Vec<String> = outcomes.iter().filter_map(|o| o.value.clone()).collect();

    if partials.is_empty() {
        return Err(DocumateError::AllChunksFailed {
            total: chunks.len(),
            retries: config.max_retries,
            first_error: first_error.unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    // Single chunk: the map output already is the document summary.
    let text = if partials.len() == 1 {
        partials.into_iter().next().unwrap_or_default()
    } else {
        let joined = partials.join("\n\n");
        invoke_model(model, 0, &prompts::summarize_combine_prompt(&joined), config)
            .await
            .map_err(|e| DocumateError::LlmFailed {
                detail: e.to_string(),
            })?
            .trim()
            .to_string()
    };

    let stats = RunStats::from_outcomes(&outcomes, start.elapsed().as_millis() as u64);
    info!(
        "Summarise complete: {}/{} chunks in {}ms",
        stats.processed_chunks, stats.total_chunks, stats.total_duration_ms
    );

    Ok(Summary { text, stats })
}
