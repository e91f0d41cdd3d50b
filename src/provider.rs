//! Injected capability traits: model calls, web search, indexing, rendering.
//!
//! The pipelines in this crate are pure orchestration — every network-bound
//! or format-bound operation is behind one of these traits and supplied by
//! the caller as an `Arc<dyn …>`. That keeps process-wide state limited to
//! whatever credential loading the caller's implementations do at startup,
//! and lets tests drive every pipeline with scripted fakes instead of live
//! services.
//!
//! All traits are `Send + Sync` so a single implementation can serve
//! concurrent per-chunk calls.

use crate::chunk::Chunk;
use crate::error::ProviderError;
use crate::pipeline::outline::Outline;
use crate::template::TemplateConfig;
use async_trait::async_trait;
use std::path::PathBuf;

/// A synchronous-feeling completion interface over a language model.
///
/// Implementations wrap whatever client library the host application uses;
/// the pipelines only ever send a prompt string and read back the raw
/// response text. Transient failures should map to
/// [`ProviderError::RateLimited`] or [`ProviderError::Network`] so the
/// retry layer can distinguish them from permanent
/// [`ProviderError::Auth`] failures.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a prompt and return the model's response text.
    async fn invoke(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Web search lookup used by the fact-check pipeline.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a search query and return the result text (snippets, links —
    /// whatever the backing engine produces; it is fed verbatim into the
    /// verdict prompt).
    async fn search(&self, query: &str) -> Result<String, ProviderError>;
}

/// Builds a retrieval index over a document's chunks.
#[async_trait]
pub trait IndexBuilder: Send + Sync {
    /// Embed and index the chunks, returning a queryable handle.
    async fn build(&self, chunks: &[Chunk]) -> Result<Box<dyn DocumentIndex>, ProviderError>;
}

/// A built retrieval index that can answer questions about its document.
#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Retrieve relevant context for the question and return an answer.
    async fn query(&self, question: &str) -> Result<String, ProviderError>;
}

/// Renders a repaired outline into an output file.
///
/// The formatting pipeline hands over a structurally valid [`Outline`]
/// (the repair step guarantees this) and the selected [`TemplateConfig`];
/// what "rendering" means — DOCX, PDF, HTML — is entirely up to the
/// implementation.
#[async_trait]
pub trait OutlineRenderer: Send + Sync {
    /// Write the outline with the given template and return the output path.
    async fn render(
        &self,
        outline: &Outline,
        template: &TemplateConfig,
    ) -> Result<PathBuf, ProviderError>;
}
