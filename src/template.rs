//! Document types and the style templates applied when rendering.
//!
//! Type detection is a model call and therefore free text: the model is
//! asked for a bare label but may answer with casing, quotes, or a
//! trailing period. [`DocumentType::parse`] absorbs that noise;
//! anything it cannot place maps to the default template (report) at the
//! selection step. [`TemplateConfig::for_type`] is a pure, total lookup —
//! it never fails, whatever the detected type.

use serde::{Deserialize, Serialize};

/// The closed set of labels the classifier prompt offers the model.
pub const DOCUMENT_TYPE_LABELS: &[&str] =
    &["report", "proposal", "resume", "meeting_notes", "other"];

/// Detected document category, driving template selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Formal report (default).
    #[default]
    Report,
    Proposal,
    Resume,
    MeetingNotes,
    /// Recognised as none of the specific types.
    Other,
}

impl DocumentType {
    /// Parse free-text classifier output into a document type.
    ///
    /// Trims whitespace, surrounding quotes, and a trailing period, and
    /// ignores case. Returns `None` for anything outside the closed set —
    /// the caller falls back to the default type.
    pub fn parse(raw: &str) -> Option<Self> {
        let label = raw
            .trim()
            .trim_matches(|c| c == '\'' || c == '"' || c == '.' || c == '`')
            .to_lowercase();
        match label.as_str() {
            "report" => Some(Self::Report),
            "proposal" => Some(Self::Proposal),
            "resume" => Some(Self::Resume),
            "meeting_notes" => Some(Self::MeetingNotes),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// The label used in prompts and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Proposal => "proposal",
            Self::Resume => "resume",
            Self::MeetingNotes => "meeting_notes",
            Self::Other => "other",
        }
    }
}

/// A named style profile applied when rendering an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Body font family.
    pub font: String,
    /// Body font size in points.
    pub font_size: u32,
    /// Level-1 heading size in points.
    pub heading1_size: u32,
    /// Level-2 heading size in points, when the template uses level-2
    /// headings at all.
    pub heading2_size: Option<u32>,
    /// Whether to emit a table of contents.
    pub toc: bool,
    /// Optional logo image path.
    pub logo: Option<String>,
}

impl TemplateConfig {
    /// Select the template for a detected document type.
    ///
    /// Total: every type has a template, and unknown detection results
    /// never reach this far (they default to [`DocumentType::Report`]).
    pub fn for_type(doc_type: DocumentType) -> Self {
        match doc_type {
            DocumentType::Report => Self {
                font: "Times New Roman".into(),
                font_size: 12,
                heading1_size: 16,
                heading2_size: Some(14),
                toc: true,
                logo: Some("company_logo.png".into()),
            },
            DocumentType::Proposal => Self {
                font: "Arial".into(),
                font_size: 12,
                heading1_size: 16,
                heading2_size: Some(14),
                toc: true,
                logo: Some("company_logo.png".into()),
            },
            DocumentType::Resume => Self {
                font: "Calibri".into(),
                font_size: 11,
                heading1_size: 14,
                heading2_size: None,
                toc: false,
                logo: None,
            },
            DocumentType::MeetingNotes => Self {
                font: "Calibri".into(),
                font_size: 12,
                heading1_size: 14,
                heading2_size: None,
                toc: false,
                logo: None,
            },
            DocumentType::Other => Self {
                font: "Arial".into(),
                font_size: 12,
                heading1_size: 16,
                heading2_size: Some(14),
                toc: false,
                logo: None,
            },
        }
    }
}

impl Default for TemplateConfig {
    /// The report template — used whenever type detection is
    /// inconclusive.
    fn default() -> Self {
        Self::for_type(DocumentType::Report)
    }
}
