//! Grammar pipeline: per-chunk spelling, grammar, and punctuation review.
//!
//! Every chunk produces exactly one report entry, failure or not. A chunk
//! whose model call failed, or whose response could not be recovered into
//! the expected shape, gets the all-null [`GrammarFinding`] — the same
//! value the model returns for clean text. Downstream display code can
//! therefore zip the report against the chunk list without length checks,
//! and each entry already carries its chunk text so nobody has to look it
//! up by index.

use crate::chunk::Chunk;
use crate::config::PipelineConfig;
use crate::output::RunStats;
use crate::pipeline::llm::invoke_model;
use crate::prompts;
use crate::provider::LanguageModel;
use crate::repair;
use crate::runner::run_chunks;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// A mistake or correction field: the model may answer with one string or
/// a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    One(String),
    Many(Vec<String>),
}

/// Category of a detected mistake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MistakeKind {
    Spelling,
    Grammar,
    Punctuation,
}

/// The grammar-review response schema, every field independently
/// nullable. All-null means "no mistakes found" — and is also the
/// fallback when a chunk's review failed outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarFinding {
    #[serde(default)]
    pub mistake: Option<TextOrList>,
    #[serde(default, rename = "type")]
    pub kind: Option<MistakeKind>,
    #[serde(default)]
    pub correction: Option<TextOrList>,
}

impl GrammarFinding {
    /// True when no field carries a value.
    pub fn is_clean(&self) -> bool {
        self.mistake.is_none() && self.kind.is_none() && self.correction.is_none()
    }
}

/// One report entry per chunk, carrying the chunk text for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarEntry {
    pub chunk_index: usize,
    pub chunk_text: String,
    pub finding: GrammarFinding,
}

/// The full per-chunk grammar report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarReport {
    /// One entry per chunk, in chunk order.
    pub entries: Vec<GrammarEntry>,
    pub stats: RunStats,
}

/// Review every chunk for spelling, grammar, and punctuation mistakes.
///
/// The report always contains exactly one entry per chunk; per-chunk
/// failures collapse to the all-null finding rather than being omitted.
pub async fn check_grammar(
    model: &Arc<dyn LanguageModel>,
    chunks: &[Chunk],
    config: &PipelineConfig,
) -> GrammarReport {
    let start = Instant::now();
    info!("Grammar review: {} chunks", chunks.len());

    let outcomes = run_chunks(chunks, config, |chunk| {
        let model = Arc::clone(model);
        async move {
            let response =
                invoke_model(&model, chunk.index, &prompts::grammar_prompt(&chunk.text), config)
                    .await?;
            Ok(repair::parse_object::<GrammarFinding>(&response))
        }
    })
    .await;

    let stats = RunStats::from_outcomes(&outcomes, start.elapsed().as_millis() as u64);

    let entries = outcomes
        .into_iter()
        .zip(chunks)
        .map(|(outcome, chunk)| GrammarEntry {
            chunk_index: chunk.index,
            chunk_text: chunk.text.clone(),
            finding: outcome.value.unwrap_or_default(),
        })
        .collect();

    info!(
        "Grammar review complete: {}/{} chunks in {}ms",
        stats.processed_chunks, stats.total_chunks, stats.total_duration_ms
    );

    GrammarReport { entries, stats }
}
