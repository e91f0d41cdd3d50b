//! Key-point extraction: pull facts, fields, and insights out of the
//! whole document as a bullet list.
//!
//! Deliberately schema-free — the model's bullet list is the product, so
//! there is nothing to repair. The single-shot call still goes through
//! the retry/deadline wrapper.

use crate::config::PipelineConfig;
use crate::document::Document;
use crate::error::DocumateError;
use crate::pipeline::llm::invoke_model;
use crate::prompts;
use crate::provider::LanguageModel;
use std::sync::Arc;
use tracing::info;

/// Extract key facts, important fields, and insights from the document.
///
/// Returns the model's bullet list verbatim.
///
/// # Errors
/// [`DocumateError::LlmFailed`] when the call exhausts its retries.
pub async fn extract_key_points(
    model: &Arc<dyn LanguageModel>,
    document: &Document,
    config: &PipelineConfig,
) -> Result<String, DocumateError> {
    let text = document.full_text();
    info!("Key-point extraction: {} chars of document text", text.len());

    let response = invoke_model(model, 0, &prompts::key_points_prompt(&text), config)
        .await
        .map_err(|e| DocumateError::LlmFailed {
            detail: e.to_string(),
        })?;

    Ok(response.trim().to_string())
}
