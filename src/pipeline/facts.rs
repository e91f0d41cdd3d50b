//! Fact-check pipeline: extract verifiable claims per chunk, look each
//! one up on the web, and ask the model for a verdict.
//!
//! ## Flow
//!
//! ```text
//! chunks ──▶ claim extraction ──▶ filter nulls ──▶ search ──▶ verdict
//!            (per chunk, 4.3)     ("null"/empty)   (per claim, isolated)
//! ```
//!
//! Most chunks carry no verifiable claim — opinions, headings, filler —
//! and the extraction prompt is explicitly allowed to say so with a null.
//! The filter also drops the *literal string* `"null"`: smaller models
//! regularly serialise the sentinel as text instead of a JSON null, and
//! forwarding it would send the word "null" to a search engine.
//!
//! An empty claim list is reported as [`FactCheckReport::NoClaims`], not
//! an empty result vector — callers can tell "nothing worth checking"
//! apart from "checked everything, all failed".

use crate::chunk::Chunk;
use crate::config::PipelineConfig;
use crate::error::ChunkError;
use crate::output::RunStats;
use crate::pipeline::llm::invoke_model;
use crate::prompts;
use crate::provider::{LanguageModel, SearchProvider};
use crate::repair;
use crate::runner::run_chunks;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// The claim-extraction response schema: `{"fact": string|null}`.
#[derive(Debug, Deserialize)]
struct ClaimEnvelope {
    fact: Option<String>,
}

/// One fact-checked claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactCheckResult {
    /// Index of the chunk the claim came from.
    pub chunk_index: usize,
    /// The verifiable statement, verbatim from extraction.
    pub claim: String,
    /// The model's verdict text (true/false, corrections, references),
    /// absent when search or verification failed for this claim.
    pub verdict: Option<String>,
    /// The recorded failure, when search or verification failed.
    pub error: Option<ChunkError>,
}

/// Outcome of a fact-check run.
///
/// Tagged so that "the document contained nothing verifiable" stays
/// distinguishable from "every claim was processed" with zero results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FactCheckReport {
    /// No chunk produced a verifiable claim.
    NoClaims,
    /// One entry per surviving claim, in claim-discovery order.
    Results {
        results: Vec<FactCheckResult>,
        stats: RunStats,
    },
}

/// Run the full fact-check flow over pre-split chunks.
///
/// Claim extraction failures and per-claim search/verdict failures are
/// recorded on their items; this function itself never fails.
pub async fn check_facts(
    model: &Arc<dyn LanguageModel>,
    search: &Arc<dyn SearchProvider>,
    chunks: &[Chunk],
    config: &PipelineConfig,
) -> FactCheckReport {
    let start = Instant::now();
    info!("Fact-check: extracting claims from {} chunks", chunks.len());

    let claims = extract_claims(model, chunks, config).await;

    if claims.is_empty() {
        info!("Fact-check: no verifiable claims found");
        return FactCheckReport::NoClaims;
    }

    info!("Fact-check: verifying {} claims", claims.len());

    // Claims are independent once extracted; verify them with the same
    // bounded fan-out as chunk transforms, restoring discovery order after.
    let mut results: Vec<FactCheckResult> =
        stream::iter(claims.into_iter().map(|(chunk_index, claim)| {
            let model = Arc::clone(model);
            let search = Arc::clone(search);
            async move {
                let (verdict, error) =
                    match verify_claim(&model, &search, chunk_index, &claim, config).await {
                        Ok(verdict) => (Some(verdict), None),
                        Err(e) => (None, Some(e)),
                    };
                FactCheckResult {
                    chunk_index,
                    claim,
                    verdict,
                    error,
                }
            }
        }))
        .buffer_unordered(config.concurrency)
        .collect()
        .await;

    results.sort_by_key(|r| r.chunk_index);

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    let stats = RunStats {
        total_chunks: results.len(),
        processed_chunks: results.len() - failed,
        failed_chunks: failed,
        total_duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Fact-check complete: {}/{} claims verified in {}ms",
        stats.processed_chunks, stats.total_chunks, stats.total_duration_ms
    );

    FactCheckReport::Results { results, stats }
}

/// Extract at most one claim per chunk, dropping chunks with none.
///
/// Returns `(chunk_index, claim)` pairs in chunk order.
async fn extract_claims(
    model: &Arc<dyn LanguageModel>,
    chunks: &[Chunk],
    config: &PipelineConfig,
) -> Vec<(usize, String)> {
    let outcomes = run_chunks(chunks, config, |chunk| {
        let model = Arc::clone(model);
        async move {
            let response =
                invoke_model(&model, chunk.index, &prompts::claim_extraction_prompt(&chunk.text), config)
                    .await?;
            Ok(claim_from_response(&response))
        }
    })
    .await;

    outcomes
        .into_iter()
        .filter_map(|o| {
            let index = o.chunk_index;
            o.value.map(|claim| (index, claim))
        })
        .collect()
}

/// Decode the extraction response and apply the null filter.
fn claim_from_response(response: &str) -> Option<String> {
    let envelope: ClaimEnvelope = repair::parse_object(response)?;
    let fact = envelope.fact?;
    let trimmed = fact.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        debug!("Dropping null-sentinel claim");
        return None;
    }
    Some(trimmed.to_string())
}

/// Search the web for a claim, then ask the model for a verdict.
async fn verify_claim(
    model: &Arc<dyn LanguageModel>,
    search: &Arc<dyn SearchProvider>,
    chunk_index: usize,
    claim: &str,
    config: &PipelineConfig,
) -> Result<String, ChunkError> {
    let evidence = search
        .search(claim)
        .await
        .map_err(|e| ChunkError::SearchFailed {
            chunk: chunk_index,
            detail: e.to_string(),
        })?;

    invoke_model(
        model,
        chunk_index,
        &prompts::claim_verdict_prompt(claim, &evidence),
        config,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_survives_when_present() {
        let claim = claim_from_response(r#"{"fact": "The Eiffel Tower was built in 1889."}"#);
        assert_eq!(claim.as_deref(), Some("The Eiffel Tower was built in 1889."));
    }

    #[test]
    fn json_null_is_dropped() {
        assert_eq!(claim_from_response(r#"{"fact": null}"#), None);
    }

    #[test]
    fn literal_null_string_is_dropped() {
        assert_eq!(claim_from_response(r#"{"fact": "null"}"#), None);
        assert_eq!(claim_from_response(r#"{"fact": "NULL"}"#), None);
    }

    #[test]
    fn empty_and_whitespace_claims_are_dropped() {
        assert_eq!(claim_from_response(r#"{"fact": ""}"#), None);
        assert_eq!(claim_from_response(r#"{"fact": "   "}"#), None);
    }

    #[test]
    fn unparseable_response_is_dropped() {
        assert_eq!(claim_from_response("I found no facts."), None);
    }

    #[test]
    fn fenced_claim_is_recovered() {
        let raw = "```json\n{\"fact\": \"Mount Everest is 8849 m tall.\"}\n```";
        assert_eq!(
            claim_from_response(raw).as_deref(),
            Some("Mount Everest is 8849 m tall.")
        );
    }
}
