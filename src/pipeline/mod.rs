//! Document-assistant pipelines.
//!
//! Each submodule composes the core stages (normalise → chunk → transform
//! → recover) into one user-facing flow. Keeping flows separate makes each
//! independently testable and lets us change one without touching the
//! others.
//!
//! ## Data Flow
//!
//! ```text
//! document ──▶ full_text ──▶ split_text ──▶ run_chunks ──▶ repair ──▶ report
//! (loader)     (normalise)   (chunker)      (model calls)  (recovery)
//! ```
//!
//! 1. [`llm`]       — retry/backoff/timeout wrapper around the injected
//!    model; the only place that talks to [`crate::provider::LanguageModel`]
//! 2. [`facts`]     — claim extraction, web search, verdicts
//! 3. [`grammar`]   — per-chunk spelling/grammar/punctuation findings
//! 4. [`outline`]   — type detection, template selection, outline
//!    generation and repair, delegated rendering
//! 5. [`gaps`]      — expected/present/missing section analysis
//! 6. [`summarize`] — map-reduce document summarisation
//! 7. [`keypoints`] — key-fact and insight extraction
//! 8. [`qa`]        — retrieval-index question answering

pub mod facts;
pub mod gaps;
pub mod grammar;
pub mod keypoints;
pub mod llm;
pub mod outline;
pub mod qa;
pub mod summarize;
