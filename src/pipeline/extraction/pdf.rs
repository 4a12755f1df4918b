use super::types::PdfExtractor;
use super::ExtractionError;

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers; scanned pages come back blank.
#[cfg(feature = "pdf")]
pub struct PdfTextExtractor;

#[cfg(feature = "pdf")]
impl PdfExtractor for PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))
    }
}

/// Stand-in used when the crate is built without the `pdf` feature.
pub struct UnavailablePdfExtractor;

impl PdfExtractor for UnavailablePdfExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        Err(ExtractionError::PdfUnavailable)
    }
}

/// The best PDF extractor this build provides.
pub fn default_pdf_extractor() -> Box<dyn PdfExtractor + Send + Sync> {
    #[cfg(feature = "pdf")]
    {
        Box::new(PdfTextExtractor)
    }
    #[cfg(not(feature = "pdf"))]
    {
        Box::new(UnavailablePdfExtractor)
    }
}
