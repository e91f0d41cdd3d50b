//! Outline/formatting pipeline: classify the document, pick a style
//! template, generate and repair an outline, and hand it to the renderer.
//!
//! ## Flow
//!
//! ```text
//! document ──▶ detect type ──▶ select template ──▶ generate outline
//!                  │                                     │
//!            (free text,                          (near-JSON text,
//!             normalised)                          repaired via 4.2)
//!                  └──────────▶ render(outline, template) ◀──────────┘
//! ```
//!
//! Two recovery points keep this pipeline total past the fatal loading
//! stage: an unrecognised type label falls back to the default (report)
//! template, and an unrecoverable outline falls back to
//! [`Outline::fallback`], so the renderer always receives a structurally
//! valid object.

use crate::config::PipelineConfig;
use crate::document::Document;
use crate::error::DocumateError;
use crate::pipeline::llm::invoke_model;
use crate::prompts;
use crate::provider::{LanguageModel, OutlineRenderer};
use crate::repair;
use crate::template::{DocumentType, TemplateConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// A structured document outline, as recovered from model output.
///
/// Every field is defaulted so a sparse or partially malformed object
/// still decodes — a section without bullets is a section, not a parse
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub subheadings: Vec<Subheading>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subheading {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

impl Outline {
    /// The minimal outline substituted when generation output is
    /// unrecoverable: one "Document" section, nothing else.
    pub fn fallback() -> Self {
        Self {
            sections: vec![Section {
                heading: "Document".to_string(),
                subheadings: Vec::new(),
                bullets: Vec::new(),
            }],
        }
    }
}

/// Result of the formatting pipeline: what was detected, what was
/// selected, what was generated, and where the renderer wrote it.
#[derive(Debug, Clone)]
pub struct FormattedDocument {
    pub doc_type: DocumentType,
    pub template: TemplateConfig,
    pub outline: Outline,
    /// Path returned by the injected renderer.
    pub output: PathBuf,
}

/// Classify the document, generate and repair an outline, and render it.
///
/// # Errors
/// Only structural failures surface here: the classification or outline
/// model call exhausting its retries
/// ([`DocumateError::LlmFailed`]) or the renderer failing
/// ([`DocumateError::RenderFailed`]). Unrecognised type labels and
/// malformed outline text are recovered, not raised.
pub async fn format_document(
    model: &Arc<dyn LanguageModel>,
    renderer: &Arc<dyn OutlineRenderer>,
    document: &Document,
    config: &PipelineConfig,
) -> Result<FormattedDocument, DocumateError> {
    let text = document.full_text();

    let doc_type = detect_document_type(model, &text, config).await?;
    let template = TemplateConfig::for_type(doc_type);
    info!(
        "Formatting: detected type '{}', template '{}'",
        doc_type.as_str(),
        template.font
    );

    let outline = generate_outline(model, &text, config).await?;

    let output = renderer
        .render(&outline, &template)
        .await
        .map_err(|e| DocumateError::RenderFailed {
            detail: e.to_string(),
        })?;

    info!("Formatting complete: rendered to '{}'", output.display());

    Ok(FormattedDocument {
        doc_type,
        template,
        outline,
        output,
    })
}

/// Ask the model to classify the document.
///
/// Free-text output is normalised by [`DocumentType::parse`]; anything
/// unrecognised falls back to the default type.
pub async fn detect_document_type(
    model: &Arc<dyn LanguageModel>,
    doc_text: &str,
    config: &PipelineConfig,
) -> Result<DocumentType, DocumateError> {
    let response = invoke_model(model, 0, &prompts::classify_prompt(doc_text), config)
        .await
        .map_err(|e| DocumateError::LlmFailed {
            detail: e.to_string(),
        })?;

    Ok(DocumentType::parse(&response).unwrap_or_else(|| {
        warn!(
            "Unrecognised document type '{}', defaulting to report",
            response.trim()
        );
        DocumentType::default()
    }))
}

/// Ask the model for an outline and repair the response.
///
/// Malformed output substitutes [`Outline::fallback`] so the caller
/// always receives a structurally valid outline.
pub async fn generate_outline(
    model: &Arc<dyn LanguageModel>,
    doc_text: &str,
    config: &PipelineConfig,
) -> Result<Outline, DocumateError> {
    let response = invoke_model(model, 0, &prompts::outline_prompt(doc_text), config)
        .await
        .map_err(|e| DocumateError::LlmFailed {
            detail: e.to_string(),
        })?;

    Ok(repair::parse_object::<Outline>(&response).unwrap_or_else(|| {
        warn!("Outline output unrecoverable, substituting fallback outline");
        Outline::fallback()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_decodes_nested_structure() {
        let raw = r#"{
            "sections": [
                {
                    "heading": "Introduction",
                    "subheadings": [{"heading": "Scope", "bullets": ["goals", "limits"]}],
                    "bullets": ["overview"]
                }
            ]
        }"#;
        let outline: Outline = repair::parse_object(raw).unwrap();
        assert_eq!(outline.sections.len(), 1);
        assert_eq!(outline.sections[0].heading, "Introduction");
        assert_eq!(outline.sections[0].subheadings[0].bullets.len(), 2);
    }

    #[test]
    fn sparse_outline_decodes_with_defaults() {
        let raw = r#"{"sections": [{"heading": "Only a heading"}]}"#;
        let outline: Outline = repair::parse_object(raw).unwrap();
        assert!(outline.sections[0].subheadings.is_empty());
        assert!(outline.sections[0].bullets.is_empty());
    }

    #[test]
    fn fallback_outline_shape() {
        let outline = Outline::fallback();
        assert_eq!(outline.sections.len(), 1);
        assert_eq!(outline.sections[0].heading, "Document");
        assert!(outline.sections[0].subheadings.is_empty());
        assert!(outline.sections[0].bullets.is_empty());
    }

    #[test]
    fn fenced_outline_is_recovered() {
        let raw = "```json\n{\"sections\": [{\"heading\": \"A\"}]}\n```";
        let outline: Outline = repair::parse_object(raw).unwrap();
        assert_eq!(outline.sections[0].heading, "A");
    }
}
