//! Error types for the documate library.
//!
//! Three distinct error types reflect three distinct failure modes:
//!
//! * [`DocumateError`] — **Fatal**: the pipeline cannot proceed at all
//!   (unsupported file format, missing file, empty document, invalid
//!   configuration). Returned as `Err(DocumateError)` from the top-level
//!   pipeline functions.
//!
//! * [`ChunkError`] — **Non-fatal**: a single chunk or claim failed
//!   (model call exhausted its retries, search lookup failed) but every
//!   other item is fine. Stored inside [`crate::output::ChunkOutcome`] so
//!   callers can inspect partial success rather than losing the whole run
//!   to one bad chunk.
//!
//! * [`ProviderError`] — what the injected capabilities (model, search,
//!   index, renderer) return across the trait boundary. The retry layer in
//!   [`crate::pipeline::llm`] converts these into a [`ChunkError`] once
//!   retries are exhausted.
//!
//! The separation lets callers decide their own tolerance: abort on the
//! first chunk failure, log and continue, or collect all errors for a
//! post-run report.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the documate library.
///
/// Chunk-level failures use [`ChunkError`] and are stored in
/// [`crate::output::ChunkOutcome`] rather than propagated here.
#[derive(Debug, Error)]
pub enum DocumateError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Document not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// No reader is registered for the file's extension.
    #[error("Unsupported format '.{extension}' for '{path}'\nRegister a reader for this extension on the DocumentLoader.")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// A reader was found but could not parse the file.
    #[error("Failed to read document '{path}': {detail}")]
    CorruptDocument { path: PathBuf, detail: String },

    /// The document loaded but produced no usable text.
    #[error("Document '{path}' contains no extractable text")]
    EmptyDocument { path: PathBuf },

    // ── Pipeline errors ───────────────────────────────────────────────────
    /// Every chunk failed after all retries; output would be empty.
    #[error("All {total} chunks failed after {retries} retries each.\nFirst error: {first_error}")]
    AllChunksFailed {
        total: usize,
        retries: u32,
        first_error: String,
    },

    /// A single-shot model call (not part of a per-chunk batch) failed
    /// after all retries.
    #[error("Model call failed after retries: {detail}")]
    LlmFailed { detail: String },

    /// The injected outline renderer reported an error.
    #[error("Rendering failed: {detail}")]
    RenderFailed { detail: String },

    /// The injected index builder or index query reported an error.
    #[error("Document index error: {detail}")]
    IndexFailed { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single chunk or claim.
///
/// Stored alongside [`crate::output::ChunkOutcome`] when an item fails.
/// The overall run continues unless ALL items fail.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum ChunkError {
    /// Model call failed after retries.
    #[error("Chunk {chunk}: model call failed after {retries} retries: {detail}")]
    LlmFailed {
        chunk: usize,
        retries: u8,
        detail: String,
    },

    /// Model call timed out.
    #[error("Chunk {chunk}: model call timed out after {secs}s")]
    Timeout { chunk: usize, secs: u64 },

    /// Web search lookup failed for a claim.
    #[error("Chunk {chunk}: search lookup failed: {detail}")]
    SearchFailed { chunk: usize, detail: String },
}

/// Errors surfaced by the injected capabilities (model, search, index,
/// renderer) across the trait boundary.
///
/// Rate-limit and network errors are transient and retried by the
/// pipeline; auth errors are permanent and surface immediately.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The service returned HTTP 429 — the caller should back off.
    ///
    /// Check `retry_after_secs` for a server-specified delay, or use
    /// exponential backoff if `None`.
    #[error("Rate limit exceeded")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Authentication failed (401/403) — retry unlikely to help.
    #[error("Authentication error: {detail}")]
    Auth { detail: String },

    /// Transport-level failure (connection refused, DNS, TLS).
    #[error("Network error: {detail}")]
    Network { detail: String },

    /// The service answered with a non-retryable application error.
    #[error("API error: {message}")]
    Api { message: String },
}
