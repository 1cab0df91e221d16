// Extraction collaborators: turn uploaded files and job links into plain text.
//
// Failures never propagate into the assessment core. Each extractor converts
// its own failure into a placeholder sentence that carries one of the
// failure markers in `assessment::quality::FAILURE_MARKERS`, so the text is
// classified as limited and generation proceeds.

pub mod docx;
pub mod image;
pub mod link;
pub mod pdf;
pub mod prompts;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which extraction pathway produced a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Image,
    Link,
    Pdf,
    Docx,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Image => "image",
            Origin::Link => "link",
            Origin::Pdf => "pdf",
            Origin::Docx => "docx",
        }
    }
}

/// Text as produced by an extractor. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub origin: Origin,
    pub text: String,
}

impl ExtractedText {
    pub fn new(origin: Origin, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
        }
    }
}

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Accepted CV container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvFormat {
    Pdf,
    Docx,
}

impl CvFormat {
    /// Content type first; falls back to the file extension when the client
    /// sent a generic type such as `application/octet-stream`.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        match content_type.map(|c| c.split(';').next().unwrap_or(c).trim()) {
            Some(PDF_MIME) => return Some(CvFormat::Pdf),
            Some(DOCX_MIME) => return Some(CvFormat::Docx),
            _ => {}
        }

        let ext = file_name?.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(CvFormat::Pdf),
            "docx" => Some(CvFormat::Docx),
            _ => None,
        }
    }

    pub fn origin(&self) -> Origin {
        match self {
            CvFormat::Pdf => Origin::Pdf,
            CvFormat::Docx => Origin::Docx,
        }
    }
}

/// Extracts CV text on the blocking pool. A parse failure yields a
/// placeholder rather than an error.
pub async fn extract_cv(format: CvFormat, bytes: Bytes) -> ExtractedText {
    let origin = format.origin();
    let result = tokio::task::spawn_blocking(move || match format {
        CvFormat::Pdf => pdf::extract_text(&bytes),
        CvFormat::Docx => docx::extract_text(&bytes),
    })
    .await;

    let text = match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("CV extraction failed ({}): {e:#}", origin.as_str());
            cv_failure_placeholder(origin, &e.to_string())
        }
        Err(e) => {
            warn!("CV extraction task panicked ({}): {e}", origin.as_str());
            cv_failure_placeholder(origin, "extraction task did not complete")
        }
    };

    ExtractedText::new(origin, text)
}

pub fn cv_failure_placeholder(origin: Origin, reason: &str) -> String {
    format!(
        "Failed to process CV file ({}): {reason}. No details from the CV are available.",
        origin.as_str()
    )
}
