pub mod types;
pub mod sanitize;
pub mod lab_terms;
pub mod pdf;
pub mod orchestrator;

pub use types::*;
pub use sanitize::*;
pub use lab_terms::*;
pub use pdf::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("PDF support not compiled in (enable the `pdf` feature)")]
    PdfUnavailable,

    #[error("Text encoding error: {0}")]
    EncodingError(String),

    #[error("Unsupported format for extraction: {0}")]
    UnsupportedFormat(String),
}
