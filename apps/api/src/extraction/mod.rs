//! Document Extractor — turns uploaded resume bytes into plain text.

pub mod pdf;

use thiserror::Error;

pub use pdf::PdfExtractor;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("uploaded file is empty")]
    Empty,

    #[error("uploaded file is not a PDF document")]
    NotPdf,

    #[error("PDF could not be parsed: {0}")]
    Parse(String),

    #[error("temporary file error: {0}")]
    Io(#[from] std::io::Error),
}
