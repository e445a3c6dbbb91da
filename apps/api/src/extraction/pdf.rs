use std::io::Write;
use std::path::PathBuf;

use bytes::Bytes;
use tracing::debug;

use crate::extraction::ExtractError;

/// The PDF header may be preceded by junk; readers only look this far in.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Extracts text from an uploaded PDF.
///
/// The bytes are staged in a `NamedTempFile` under `temp_dir`. The file is removed
/// when the guard drops, which covers the success path, parser errors, and a panic
/// inside the parser alike.
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    temp_dir: PathBuf,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self::with_temp_dir(std::env::temp_dir())
    }

    pub fn with_temp_dir(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
        }
    }

    /// Returns the concatenated text of all pages, in page order, trimmed at both ends.
    pub async fn extract_text(&self, data: Bytes) -> Result<String, ExtractError> {
        if data.is_empty() {
            return Err(ExtractError::Empty);
        }
        if !looks_like_pdf(&data) {
            return Err(ExtractError::NotPdf);
        }

        let temp_dir = self.temp_dir.clone();
        let size = data.len();

        // pdf-extract is synchronous and may panic on malformed streams.
        let text = tokio::task::spawn_blocking(move || extract_via_tempfile(&data, temp_dir))
            .await
            .map_err(|e| ExtractError::Parse(format!("PDF parser aborted: {e}")))??;

        debug!("Extracted {} chars from {} byte PDF", text.len(), size);
        Ok(text)
    }
}

fn extract_via_tempfile(data: &[u8], temp_dir: PathBuf) -> Result<String, ExtractError> {
    let mut file = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(".pdf")
        .tempfile_in(temp_dir)?;
    file.write_all(data)?;
    file.flush()?;

    let text =
        pdf_extract::extract_text(file.path()).map_err(|e| ExtractError::Parse(e.to_string()))?;

    Ok(text.trim().to_string())
}

fn looks_like_pdf(data: &[u8]) -> bool {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}
