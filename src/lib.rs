//! # documate
//!
//! Document-assistant pipelines: chunk a document and route the chunks
//! through a language model for fact-checking, grammar review,
//! outline-based reformatting, gap analysis, summarisation, and question
//! answering.
//!
//! ## Why this crate?
//!
//! The model calls themselves are the easy part. What actually breaks
//! document tooling in practice is everything around them: normalising a
//! parsed file into deterministic overlapping chunks, recovering
//! structured data from model output that arrives wrapped in markdown
//! fences and chatty prose, and keeping one failed chunk from taking the
//! other ninety-nine down with it. This crate owns exactly that
//! orchestration layer — providers, parsers, search engines, vector
//! stores, and renderers are injected as trait objects.
//!
//! ## Pipeline Overview
//!
//! ```text
//! file
//!  │
//!  ├─ 1. Load      extension-dispatched FormatReader → Document
//!  ├─ 2. Normalise content units → one text stream
//!  ├─ 3. Chunk     overlapping fixed-size windows, deterministic
//!  ├─ 4. Transform per-chunk model calls, bounded concurrency,
//!  │               per-chunk failure isolation
//!  ├─ 5. Recover   lenient JSON extraction from model output
//!  └─ 6. Report    facts / grammar / outline / gaps / summary / answers
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use documate::{check_facts, split_text, LanguageModel, PipelineConfig, SearchProvider};
//! use documate::error::ProviderError;
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct MyModel; // wraps your LLM client
//! struct MySearch; // wraps your search client
//!
//! #[async_trait]
//! impl LanguageModel for MyModel {
//!     async fn invoke(&self, prompt: &str) -> Result<String, ProviderError> {
//!         todo!("call your provider with {prompt}")
//!     }
//! }
//!
//! #[async_trait]
//! impl SearchProvider for MySearch {
//!     async fn search(&self, query: &str) -> Result<String, ProviderError> {
//!         todo!("search the web for {query}")
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let model: Arc<dyn LanguageModel> = Arc::new(MyModel);
//!     let search: Arc<dyn SearchProvider> = Arc::new(MySearch);
//!     let config = PipelineConfig::default();
//!
//!     let chunks = split_text("The Eiffel Tower was built in 1889.", config.chunk_size, config.chunk_overlap);
//!     let report = check_facts(&model, &search, &chunks, &config).await;
//!     println!("{report:?}");
//! }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod chunk;
pub mod config;
pub mod document;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod provider;
pub mod repair;
pub mod runner;
pub mod stream;
pub mod template;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use chunk::{split_text, Chunk};
pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use document::{ContentUnit, Document, DocumentLoader, FormatReader};
pub use error::{ChunkError, DocumateError, ProviderError};
pub use output::{ChunkOutcome, RunStats};
pub use pipeline::facts::{check_facts, FactCheckReport, FactCheckResult};
pub use pipeline::gaps::{suggest_content, GapAnalysis, GapReport};
pub use pipeline::grammar::{check_grammar, GrammarEntry, GrammarFinding, GrammarReport, MistakeKind, TextOrList};
pub use pipeline::keypoints::extract_key_points;
pub use pipeline::outline::{format_document, FormattedDocument, Outline, Section, Subheading};
pub use pipeline::qa::DocumentQa;
pub use pipeline::summarize::{summarize, Summary};
pub use progress::ProgressCallback;
pub use provider::{DocumentIndex, IndexBuilder, LanguageModel, OutlineRenderer, SearchProvider};
pub use repair::{extract_object, parse_object, Extraction};
pub use runner::run_chunks;
pub use stream::{stream_chunks, OutcomeStream};
pub use template::{DocumentType, TemplateConfig, DOCUMENT_TYPE_LABELS};
