//! Document processing: text → extracted values → flags → `LabReport`.
//!
//! The processor never fails on a single document. A source that cannot be
//! read is logged and produces a report over empty text, so a batch always
//! yields one report per input.

use serde::Serialize;
use uuid::Uuid;

use crate::intelligence::RangeInterpreter;
use crate::models::LabReport;
use crate::pipeline::extraction::DocumentSource;
use crate::pipeline::parsing::ParameterExtractor;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A document whose text could not be read.
#[derive(Debug, Clone, Serialize)]
pub struct ReadFailure {
    pub file: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub reports: Vec<LabReport>,
    pub read_failures: Vec<ReadFailure>,
}

pub struct ReportProcessor<'a> {
    extractor: ParameterExtractor,
    interpreter: RangeInterpreter<'a>,
}

impl<'a> ReportProcessor<'a> {
    pub fn new(extractor: ParameterExtractor, interpreter: RangeInterpreter<'a>) -> Self {
        Self {
            extractor,
            interpreter,
        }
    }

    /// Extract and flag one document's text. Sex is unknown for free-text
    /// reports, so range selection falls back per parameter.
    pub fn process_text(&self, file: &str, text: &str) -> LabReport {
        let outcome = self.extractor.extract_with_diagnostics(text);
        let interpreted = self.interpreter.interpret_all(&outcome.values, None);

        tracing::info!(
            file,
            values = outcome.values.len(),
            rejected = outcome.rejected.len(),
            "Processed lab report"
        );

        LabReport {
            id: Uuid::new_v4(),
            file: file.to_string(),
            parsed_simple: outcome
                .values
                .iter()
                .map(|(key, v)| (*key, v.canonical_value))
                .collect(),
            parsed_detailed: outcome.values,
            interpreted,
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn process_source(&self, source: &dyn DocumentSource) -> LabReport {
        let (text, _) = read_text(source);
        self.process_text(source.name(), &text)
    }

    /// Process every source; read failures are collected, never fatal.
    pub fn process_batch<'s, S, I>(&self, sources: I) -> BatchOutcome
    where
        S: DocumentSource + ?Sized + 's,
        I: IntoIterator<Item = &'s S>,
    {
        let mut batch = BatchOutcome::default();
        for source in sources {
            let (text, failure) = read_text(source);
            batch.read_failures.extend(failure);
            batch.reports.push(self.process_text(source.name(), &text));
        }
        tracing::info!(
            reports = batch.reports.len(),
            read_failures = batch.read_failures.len(),
            "Batch complete"
        );
        batch
    }
}

fn read_text<S: DocumentSource + ?Sized>(source: &S) -> (String, Option<ReadFailure>) {
    match source.text_of() {
        Ok(text) => (text, None),
        Err(e) => {
            tracing::warn!(file = source.name(), error = %e, "Could not read document text");
            let failure = ReadFailure {
                file: source.name().to_string(),
                error: e.to_string(),
            };
            (String::new(), Some(failure))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::ReferenceRangeTable;
    use crate::models::{ParameterKey, Verdict};
    use crate::pipeline::extraction::ExtractionError;

    struct InMemorySource {
        name: &'static str,
        text: Option<&'static str>,
    }

    impl DocumentSource for InMemorySource {
        fn name(&self) -> &str {
            self.name
        }

        fn text_of(&self) -> Result<String, ExtractionError> {
            self.text
                .map(str::to_string)
                .ok_or_else(|| ExtractionError::PdfParsing("truncated file".into()))
        }
    }

    const REPORT: &str = "\
City Lab - Page 1
Hemoglobin: 13.5 g/dL
Fasting Glucose 5.5 mmol/L
Total Cholesterol 240 mg/dL
Platelet Count 250000 /uL";

    #[test]
    fn builds_full_report() {
        let table = ReferenceRangeTable::with_defaults();
        let processor =
            ReportProcessor::new(ParameterExtractor::default(), RangeInterpreter::new(&table));

        let report = processor.process_text("report1.pdf", REPORT);

        assert_eq!(report.file, "report1.pdf");
        assert_eq!(report.parsed_simple[&ParameterKey::Glucose], 99.0);
        assert!(report.parsed_detailed[&ParameterKey::Glucose].was_converted);
        assert_eq!(report.parsed_simple.len(), 4);
        assert_eq!(
            report.interpreted[&ParameterKey::Cholesterol].flag,
            Verdict::High
        );
        assert_eq!(
            report.interpreted[&ParameterKey::PlateletCount].flag,
            Verdict::Normal
        );
        assert_eq!(report.timestamp.len(), 15);
        assert_eq!(&report.timestamp[8..9], "_");
    }

    #[test]
    fn report_json_shape() {
        let table = ReferenceRangeTable::with_defaults();
        let processor =
            ReportProcessor::new(ParameterExtractor::default(), RangeInterpreter::new(&table));
        let report = processor.process_text("r.txt", "Glucose 5.5");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["parsed_simple"]["glucose"], 99.0);
        assert_eq!(json["parsed_detailed"]["glucose"]["value_raw"], "5.5");
        assert_eq!(json["parsed_detailed"]["glucose"]["unit"], "suspected_mmol");
        assert_eq!(json["interpreted"]["glucose"]["flag"], "normal");
    }

    #[test]
    fn unreadable_source_yields_empty_report() {
        let table = ReferenceRangeTable::with_defaults();
        let processor =
            ReportProcessor::new(ParameterExtractor::default(), RangeInterpreter::new(&table));

        let broken = InMemorySource {
            name: "broken.pdf",
            text: None,
        };
        let report = processor.process_source(&broken);
        assert_eq!(report.file, "broken.pdf");
        assert!(report.parsed_simple.is_empty());
        assert!(report.interpreted.is_empty());
    }

    #[test]
    fn batch_continues_past_failures() {
        let table = ReferenceRangeTable::with_defaults();
        let processor =
            ReportProcessor::new(ParameterExtractor::default(), RangeInterpreter::new(&table));

        let good = InMemorySource {
            name: "a.txt",
            text: Some("Hb 12.0"),
        };
        let broken = InMemorySource {
            name: "b.pdf",
            text: None,
        };
        let later = InMemorySource {
            name: "c.txt",
            text: Some("Glucose 130 mg/dL"),
        };
        let sources: [&dyn DocumentSource; 3] = [&good, &broken, &later];

        let batch = processor.process_batch(sources);
        assert_eq!(batch.reports.len(), 3);
        assert_eq!(batch.read_failures.len(), 1);
        assert_eq!(batch.read_failures[0].file, "b.pdf");
        assert_eq!(
            batch.reports[2].interpreted[&ParameterKey::Glucose].flag,
            Verdict::High
        );
    }

    #[test]
    fn each_report_gets_a_fresh_id() {
        let table = ReferenceRangeTable::with_defaults();
        let processor =
            ReportProcessor::new(ParameterExtractor::default(), RangeInterpreter::new(&table));
        let a = processor.process_text("a.txt", "");
        let b = processor.process_text("a.txt", "");
        assert_ne!(a.id, b.id);
    }
}
