use anyhow::{Context, Result};

/// Raw text of a PDF document. CPU-bound; call from the blocking pool.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes).context("Failed to parse PDF file")?;
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_an_error() {
        assert!(extract_text(b"plain text, not a pdf").is_err());
    }
}
