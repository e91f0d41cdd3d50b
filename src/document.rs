//! Document model, loader dispatch, and text normalisation.
//!
//! File-format parsing is not this crate's business: PDF, DOCX, and PPTX
//! readers live behind the [`FormatReader`] trait and are registered on a
//! [`DocumentLoader`] by the host application. The loader owns exactly two
//! responsibilities — validating the path and dispatching on the file
//! extension — and fails fast with [`DocumateError::UnsupportedFormat`]
//! for anything it has no reader for.
//!
//! A loaded [`Document`] is an ordered sequence of [`ContentUnit`]s
//! (paragraphs, pages, slides — whatever the reader produced) and is
//! immutable from then on. [`Document::full_text`] collapses the units
//! into the single text stream the chunker consumes.

use crate::error::DocumateError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// One unit of document content — a paragraph, page, or slide.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContentUnit {
    /// Raw text of the unit, as produced by the reader.
    pub text: String,
}

impl ContentUnit {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A loaded document: the source path plus its ordered content units.
///
/// Immutable once loaded — pipelines only ever read from it.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path the document was loaded from.
    pub path: PathBuf,
    /// Ordered content units.
    pub units: Vec<ContentUnit>,
}

impl Document {
    /// Build a document directly from units, without going through a loader.
    ///
    /// Useful when the text comes from somewhere other than a file (an
    /// editor buffer, a network request).
    pub fn from_units(units: Vec<ContentUnit>) -> Self {
        Self {
            path: PathBuf::new(),
            units,
        }
    }

    /// Collapse the content units into one text stream.
    ///
    /// Units are trimmed, empty units dropped, and the remainder joined
    /// with single spaces. The result is what the chunker and the
    /// whole-document pipelines operate on.
    pub fn full_text(&self) -> String {
        self.units
            .iter()
            .map(|u| u.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// True when no unit carries any non-whitespace text.
    pub fn is_empty(&self) -> bool {
        self.units.iter().all(|u| u.text.trim().is_empty())
    }
}

/// Parses one family of file formats into content units.
///
/// Implementations wrap whatever parsing library the host application
/// uses (a PDF text extractor, a DOCX reader, …). Parsing is synchronous:
/// format readers work on local files and are invoked once per run.
pub trait FormatReader: Send + Sync {
    /// Lowercase extensions (without the dot) this reader handles.
    fn extensions(&self) -> &[&str];

    /// Parse the file into ordered content units.
    fn read(&self, path: &Path) -> Result<Vec<ContentUnit>, String>;
}

/// Extension-dispatch registry of [`FormatReader`]s.
///
/// ```rust
/// use documate::{DocumentLoader, FormatReader, ContentUnit};
/// use std::path::Path;
///
/// struct PlainText;
///
/// impl FormatReader for PlainText {
///     fn extensions(&self) -> &[&str] {
///         &["txt"]
///     }
///     fn read(&self, path: &Path) -> Result<Vec<ContentUnit>, String> {
///         let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
///         Ok(text.lines().map(ContentUnit::new).collect())
///     }
/// }
///
/// let loader = DocumentLoader::new().with_reader(std::sync::Arc::new(PlainText));
/// ```
#[derive(Default, Clone)]
pub struct DocumentLoader {
    readers: HashMap<String, Arc<dyn FormatReader>>,
}

impl DocumentLoader {
    /// Create an empty loader with no registered readers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reader under every extension it advertises.
    ///
    /// A later registration for the same extension replaces the earlier one.
    pub fn with_reader(mut self, reader: Arc<dyn FormatReader>) -> Self {
        for ext in reader.extensions() {
            self.readers.insert(ext.to_lowercase(), Arc::clone(&reader));
        }
        self
    }

    /// Load a document, dispatching on the file extension.
    ///
    /// # Errors
    /// - [`DocumateError::FileNotFound`] — the path does not exist
    /// - [`DocumateError::UnsupportedFormat`] — no reader is registered
    ///   for the extension
    /// - [`DocumateError::CorruptDocument`] — the reader failed to parse
    /// - [`DocumateError::EmptyDocument`] — the file parsed but carries no text
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Document, DocumateError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DocumateError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let reader =
            self.readers
                .get(&extension)
                .ok_or_else(|| DocumateError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    extension: extension.clone(),
                })?;

        debug!("Loading '{}' via .{} reader", path.display(), extension);

        let units = reader
            .read(path)
            .map_err(|detail| DocumateError::CorruptDocument {
                path: path.to_path_buf(),
                detail,
            })?;

        let document = Document {
            path: path.to_path_buf(),
            units,
        };

        if document.is_empty() {
            return Err(DocumateError::EmptyDocument {
                path: path.to_path_buf(),
            });
        }

        info!(
            "Loaded '{}': {} content units",
            path.display(),
            document.units.len()
        );

        Ok(document)
    }
}
