use serde::Serialize;

use super::ExtractionError;

/// How a PDF page's text was obtained. Plain-text reports bypass the
/// assembler and carry no page records.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TextMethod {
    PdfText,
    Ocr,
}

/// Text of a single page after sanitizing
#[derive(Debug, Clone, Serialize)]
pub struct PageText {
    pub page_number: usize,
    pub text: String,
    pub method: TextMethod,
}

/// Text of a whole document
#[derive(Debug, Clone, Serialize)]
pub struct AssembledText {
    pub pages: Vec<PageText>,
    pub full_text: String,
}

impl AssembledText {
    pub fn ocr_page_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.method == TextMethod::Ocr)
            .count()
    }
}

/// Text layer of a digital PDF, one string per page (blank for scanned pages)
pub trait PdfExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// OCR engine abstraction (allows mocking for tests).
/// `page_number` is 1-based.
pub trait OcrEngine {
    fn ocr_page(&self, pdf_bytes: &[u8], page_number: usize) -> Result<String, ExtractionError>;
}

/// A document that can produce its full text
pub trait DocumentSource {
    fn name(&self) -> &str;

    fn text_of(&self) -> Result<String, ExtractionError>;
}
