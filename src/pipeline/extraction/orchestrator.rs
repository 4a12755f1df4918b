use std::path::{Path, PathBuf};

use super::lab_terms::correct_lab_terms;
use super::sanitize::sanitize_text;
use super::types::{AssembledText, DocumentSource, OcrEngine, PageText, PdfExtractor, TextMethod};
use super::ExtractionError;

/// Builds the text of a PDF from its text layer, falling back to OCR for
/// pages that have none. Engines are injected so tests can mock them.
pub struct DocumentTextAssembler {
    pdf_extractor: Box<dyn PdfExtractor + Send + Sync>,
    ocr_engine: Option<Box<dyn OcrEngine + Send + Sync>>,
}

impl DocumentTextAssembler {
    pub fn new(pdf_extractor: Box<dyn PdfExtractor + Send + Sync>) -> Self {
        Self {
            pdf_extractor,
            ocr_engine: None,
        }
    }

    /// Add an OCR engine for pages without a text layer.
    pub fn with_ocr(mut self, engine: Box<dyn OcrEngine + Send + Sync>) -> Self {
        self.ocr_engine = Some(engine);
        self
    }

    /// Assemble sanitized page texts. Only a failure to read the PDF itself
    /// is an error; a page whose OCR fails stays empty.
    pub fn assemble(&self, pdf_bytes: &[u8]) -> Result<AssembledText, ExtractionError> {
        let raw_pages = self.pdf_extractor.extract_pages(pdf_bytes)?;
        let mut pages = Vec::with_capacity(raw_pages.len());

        for (idx, raw) in raw_pages.into_iter().enumerate() {
            let page_number = idx + 1;
            let page = if raw.trim().is_empty() {
                self.ocr_fallback(pdf_bytes, page_number)
            } else {
                PageText {
                    page_number,
                    text: sanitize_text(&raw),
                    method: TextMethod::PdfText,
                }
            };
            pages.push(page);
        }

        let full_text = pages
            .iter()
            .map(|p| p.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        let assembled = AssembledText { pages, full_text };
        tracing::debug!(
            pages = assembled.pages.len(),
            ocr_pages = assembled.ocr_page_count(),
            text_length = assembled.full_text.len(),
            "Document text assembled"
        );
        Ok(assembled)
    }

    fn ocr_fallback(&self, pdf_bytes: &[u8], page_number: usize) -> PageText {
        let empty = PageText {
            page_number,
            text: String::new(),
            method: TextMethod::PdfText,
        };
        let Some(engine) = &self.ocr_engine else {
            return empty;
        };

        match engine.ocr_page(pdf_bytes, page_number) {
            Ok(text) if !text.trim().is_empty() => PageText {
                page_number,
                text: sanitize_text(&correct_lab_terms(&text)),
                method: TextMethod::Ocr,
            },
            Ok(_) => empty,
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "OCR failed, page left empty");
                empty
            }
        }
    }
}

/// A plain UTF-8 text report on disk.
pub struct TextFileSource {
    path: PathBuf,
    name: String,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name }
    }
}

impl DocumentSource for TextFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn text_of(&self) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(&self.path)?;
        let text =
            String::from_utf8(bytes).map_err(|e| ExtractionError::EncodingError(e.to_string()))?;
        Ok(sanitize_text(&text))
    }
}

/// A PDF report on disk, read through an assembler.
pub struct PdfFileSource<'a> {
    path: PathBuf,
    name: String,
    assembler: &'a DocumentTextAssembler,
}

impl<'a> PdfFileSource<'a> {
    pub fn new(path: impl Into<PathBuf>, assembler: &'a DocumentTextAssembler) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self {
            path,
            name,
            assembler,
        }
    }
}

impl DocumentSource for PdfFileSource<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn text_of(&self) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(&self.path)?;
        Ok(self.assembler.assemble(&bytes)?.full_text)
    }
}

/// Pick a source for `path` by extension (`.pdf`, `.txt`).
pub fn open_source<'a>(
    path: &Path,
    assembler: &'a DocumentTextAssembler,
) -> Result<Box<dyn DocumentSource + 'a>, ExtractionError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => Ok(Box::new(PdfFileSource::new(path, assembler))),
        "txt" => Ok(Box::new(TextFileSource::new(path))),
        _ => Err(ExtractionError::UnsupportedFormat(path.display().to_string())),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockPdfExtractor {
        pages: Vec<&'static str>,
    }

    impl PdfExtractor for MockPdfExtractor {
        fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
            Ok(self.pages.iter().map(|p| p.to_string()).collect())
        }
    }

    struct FailingPdfExtractor;

    impl PdfExtractor for FailingPdfExtractor {
        fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
            Err(ExtractionError::PdfParsing("corrupt xref".into()))
        }
    }

    /// Returns a fixed text, or an error for the listed pages.
    struct MockOcrEngine {
        text: &'static str,
        failing_pages: Vec<usize>,
        calls: Arc<AtomicUsize>,
    }

    impl MockOcrEngine {
        fn new(text: &'static str) -> Self {
            Self {
                text,
                failing_pages: vec![],
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl OcrEngine for MockOcrEngine {
        fn ocr_page(&self, _pdf_bytes: &[u8], page_number: usize) -> Result<String, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing_pages.contains(&page_number) {
                return Err(ExtractionError::OcrProcessing("engine crashed".into()));
            }
            Ok(self.text.to_string())
        }
    }

    fn assembler(pages: Vec<&'static str>) -> DocumentTextAssembler {
        DocumentTextAssembler::new(Box::new(MockPdfExtractor { pages }))
    }

    #[test]
    fn digital_pages_skip_ocr() {
        let ocr = MockOcrEngine::new("unused");
        let calls = Arc::clone(&ocr.calls);
        let assembler = assembler(vec!["Hemoglobin 13.5\n", "Glucose 98 mg/dL"]).with_ocr(Box::new(ocr));

        let text = assembler.assemble(b"%PDF").unwrap();
        assert_eq!(text.full_text, "Hemoglobin 13.5\nGlucose 98 mg/dL");
        assert_eq!(text.ocr_page_count(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn blank_page_falls_back_to_ocr_with_term_correction() {
        let assembler = assembler(vec!["Hemoglobin 13.5", "   \n"])
            .with_ocr(Box::new(MockOcrEngine::new("G1ucose 98 mg/dL")));

        let text = assembler.assemble(b"%PDF").unwrap();
        assert_eq!(text.full_text, "Hemoglobin 13.5\nGlucose 98 mg/dL");
        assert_eq!(text.pages[1].method, TextMethod::Ocr);
        assert_eq!(text.ocr_page_count(), 1);
    }

    #[test]
    fn page_methods_serialize_as_pdf_text_or_ocr() {
        let assembler = assembler(vec!["Hemoglobin 13.5", ""])
            .with_ocr(Box::new(MockOcrEngine::new("Glucose 98")));

        let json = serde_json::to_value(assembler.assemble(b"%PDF").unwrap()).unwrap();
        assert_eq!(json["pages"][0]["method"], "pdf_text");
        assert_eq!(json["pages"][1]["method"], "ocr");
    }

    #[test]
    fn ocr_failure_leaves_page_empty() {
        let mut ocr = MockOcrEngine::new("Platelets 250000");
        ocr.failing_pages = vec![1];
        let assembler = assembler(vec!["", ""]).with_ocr(Box::new(ocr));

        let text = assembler.assemble(b"%PDF").unwrap();
        assert!(text.pages[0].text.is_empty());
        assert_eq!(text.full_text, "Platelets 250000");
    }

    #[test]
    fn blank_pages_without_ocr_stay_empty() {
        let text = assembler(vec!["", " "]).assemble(b"%PDF").unwrap();
        assert_eq!(text.pages.len(), 2);
        assert!(text.full_text.is_empty());
    }

    #[test]
    fn unreadable_pdf_is_an_error() {
        let assembler = DocumentTextAssembler::new(Box::new(FailingPdfExtractor));
        assert!(matches!(
            assembler.assemble(b"garbage"),
            Err(ExtractionError::PdfParsing(_))
        ));
    }

    #[test]
    fn text_file_source_reads_and_sanitizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, "  Glucose 98\r\n\r\nHb 13.5  ").unwrap();

        let source = TextFileSource::new(&path);
        assert_eq!(source.name(), "report.txt");
        assert_eq!(source.text_of().unwrap(), "Glucose 98\nHb 13.5");
    }

    #[test]
    fn text_file_source_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            TextFileSource::new(&path).text_of(),
            Err(ExtractionError::EncodingError(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let source = TextFileSource::new("/nonexistent/labsift/report.txt");
        assert!(matches!(source.text_of(), Err(ExtractionError::Io(_))));
    }

    #[test]
    fn pdf_source_goes_through_assembler() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.PDF");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let assembler = assembler(vec!["Total Cholesterol 5.2 mmol/L"]);
        let source = open_source(&path, &assembler).unwrap();
        assert_eq!(source.name(), "scan.PDF");
        assert_eq!(source.text_of().unwrap(), "Total Cholesterol 5.2 mmol/L");
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let assembler = assembler(vec![]);
        assert!(matches!(
            open_source(Path::new("notes.docx"), &assembler),
            Err(ExtractionError::UnsupportedFormat(_))
        ));
    }
}
