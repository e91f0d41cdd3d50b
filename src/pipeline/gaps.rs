//! Gap-analysis pipeline: what sections should this document have, which
//! are present, which are missing — with draft text for the gaps.
//!
//! A single-shot transform over the whole normalised document. The model
//! is asked for one JSON object; recovery goes through
//! [`crate::repair`], and output that cannot be recovered is returned as
//! [`GapReport::Malformed`] with the raw text preserved — callers can
//! still show the model's prose answer even when it ignored the schema.

use crate::config::PipelineConfig;
use crate::document::Document;
use crate::error::DocumateError;
use crate::pipeline::llm::invoke_model;
use crate::prompts;
use crate::provider::LanguageModel;
use crate::repair::{self, Extraction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// The gap-analysis response schema. Every field is defaulted so a
/// partial answer still decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapAnalysis {
    /// Document type as the model described it (free text, not the
    /// closed classifier set).
    #[serde(default)]
    pub doc_type: String,
    /// Sections a document of this type would ideally have.
    #[serde(default)]
    pub expected_sections: Vec<String>,
    /// Sections found in the document.
    #[serde(default)]
    pub present_sections: Vec<String>,
    /// Expected sections not found.
    #[serde(default)]
    pub missing_sections: Vec<String>,
    /// Bullet points rewritten as full paragraphs.
    #[serde(default)]
    pub expanded_bullets: Vec<String>,
    /// Draft text keyed by missing section name.
    #[serde(default)]
    pub drafts_for_missing: BTreeMap<String, String>,
}

/// Outcome of a gap-analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapReport {
    /// The model's answer decoded into the expected shape.
    Analysis(GapAnalysis),
    /// The model answered, but no structured object could be recovered;
    /// the raw text is preserved for display.
    Malformed { raw: String },
}

/// Analyse the document for missing sections and draft the gaps.
///
/// # Errors
/// Only the model call exhausting its retries surfaces as an error;
/// schema-less answers come back as [`GapReport::Malformed`].
pub async fn suggest_content(
    model: &Arc<dyn LanguageModel>,
    document: &Document,
    config: &PipelineConfig,
) -> Result<GapReport, DocumateError> {
    let text = document.full_text();
    info!("Gap analysis: {} chars of document text", text.len());

    let response = invoke_model(model, 0, &prompts::gap_analysis_prompt(&text), config)
        .await
        .map_err(|e| DocumateError::LlmFailed {
            detail: e.to_string(),
        })?;

    match repair::extract_object(&response) {
        Extraction::Object(value) => match serde_json::from_value::<GapAnalysis>(value) {
            Ok(analysis) => {
                info!(
                    "Gap analysis complete: {} missing sections",
                    analysis.missing_sections.len()
                );
                Ok(GapReport::Analysis(analysis))
            }
            Err(e) => {
                warn!("Gap analysis object did not match schema: {}", e);
                Ok(GapReport::Malformed { raw: response })
            }
        },
        Extraction::Failure { raw } => {
            warn!("Gap analysis output unrecoverable");
            Ok(GapReport::Malformed { raw })
        }
    }
}
