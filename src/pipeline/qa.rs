//! Question answering over a document via an injected retrieval index.
//!
//! The embedding, vector store, and retrieval mechanics are entirely the
//! host application's: this module only orchestrates "index the chunks
//! once, then answer questions against the index". Building is the
//! expensive half, so [`DocumentQa`] holds the built index and can serve
//! any number of questions.

use crate::chunk::Chunk;
use crate::error::DocumateError;
use crate::provider::{DocumentIndex, IndexBuilder};
use std::sync::Arc;
use tracing::info;

/// A document's built retrieval index, ready to answer questions.
pub struct DocumentQa {
    index: Box<dyn DocumentIndex>,
}

impl DocumentQa {
    /// Index the chunks with the injected builder.
    ///
    /// # Errors
    /// - [`DocumateError::Internal`] — called with no chunks
    /// - [`DocumateError::IndexFailed`] — the builder failed
    pub async fn build(
        builder: &Arc<dyn IndexBuilder>,
        chunks: &[Chunk],
    ) -> Result<Self, DocumateError> {
        if chunks.is_empty() {
            return Err(DocumateError::Internal(
                "cannot build a QA index over zero chunks".to_string(),
            ));
        }

        info!("QA: indexing {} chunks", chunks.len());
        let index = builder
            .build(chunks)
            .await
            .map_err(|e| DocumateError::IndexFailed {
                detail: e.to_string(),
            })?;

        Ok(Self { index })
    }

    /// Answer a question from the indexed document.
    ///
    /// # Errors
    /// [`DocumateError::IndexFailed`] when the index query fails.
    pub async fn ask(&self, question: &str) -> Result<String, DocumateError> {
        self.index
            .query(question)
            .await
            .map_err(|e| DocumateError::IndexFailed {
                detail: e.to_string(),
            })
    }
}
