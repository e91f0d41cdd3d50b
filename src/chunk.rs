//! Chunking: split normalised text into overlapping fixed-size windows.
//!
//! Chunks are the unit of independent model processing. The splitter is
//! deterministic — the same `(text, chunk_size, overlap)` triple always
//! produces the same sequence — and character-exact: windows are measured
//! in Unicode scalar values, so a multi-byte character is never cut in
//! half.
//!
//! Coverage guarantee: the first chunk, followed by every later chunk with
//! its leading `overlap` characters removed, reconstructs the input text
//! exactly.

use tracing::debug;

/// A bounded, overlapping window of a document's text.
///
/// Read-only once produced; `index` is its 0-based position in the chunk
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Chunk {
    /// 0-based position in the output sequence.
    pub index: usize,
    /// The window's text.
    pub text: String,
}

/// Split `text` into consecutive windows of `chunk_size` characters, each
/// window after the first overlapping its predecessor by `overlap`
/// characters.
///
/// Degenerate inputs: empty text yields an empty sequence; text shorter
/// than `chunk_size` yields a single chunk equal to the text.
///
/// `overlap` must be smaller than `chunk_size` (the config builder
/// enforces this); the function clamps it defensively so it can never
/// loop forever.
pub fn split_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    if text.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let overlap = overlap.min(chunk_size - 1);
    let step = chunk_size - overlap;

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::with_capacity(chars.len().div_ceil(step));
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(Chunk {
            index: chunks.len(),
            text: chars[start..end].iter().collect(),
        });
        if end == chars.len() {
            break;
        }
        start += step;
    }

    debug!(
        "Split {} chars into {} chunks (size {}, overlap {})",
        chars.len(),
        chunks.len(),
        chunk_size,
        overlap
    );

    chunks
}
