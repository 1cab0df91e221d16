use bytes::Bytes;
use tracing::{debug, warn};

use crate::extraction::prompts::IMAGE_EXTRACTION_PROMPT;
use crate::extraction::{ExtractedText, Origin};
use crate::llm_client::{CompletionProvider, CompletionRequest, ImageAttachment, LlmError};

pub const NO_TEXT_PLACEHOLDER: &str = "No text could be extracted from the job poster image.";
pub const FAILURE_PLACEHOLDER: &str = "Failed to process the job poster image. \
    No details about the company or the position are available.";

/// Reads a job poster through the provider's vision model.
pub async fn extract_job_poster(
    provider: &dyn CompletionProvider,
    bytes: Bytes,
    mime: Option<&str>,
) -> ExtractedText {
    let image = ImageAttachment {
        mime: normalize_image_mime(mime).to_string(),
        bytes,
    };
    let request = CompletionRequest::with_image(IMAGE_EXTRACTION_PROMPT, image);

    let text = match provider.complete(&request).await {
        Ok(text) => {
            debug!("Extracted {} chars from job poster", text.chars().count());
            text
        }
        Err(LlmError::EmptyContent) => NO_TEXT_PLACEHOLDER.to_string(),
        Err(e) => {
            warn!("Job poster extraction failed: {e}");
            FAILURE_PLACEHOLDER.to_string()
        }
    };

    ExtractedText::new(Origin::Image, text)
}

/// Vision endpoints accept a handful of image types; anything unrecognised
/// is sent as JPEG.
fn normalize_image_mime(mime: Option<&str>) -> &'static str {
    match mime.map(|m| m.trim().to_ascii_lowercase()).as_deref() {
        Some("image/png") => "image/png",
        Some("image/webp") => "image/webp",
        Some("image/gif") => "image/gif",
        _ => "image/jpeg",
    }
}
