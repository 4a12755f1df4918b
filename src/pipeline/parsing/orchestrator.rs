use std::collections::BTreeMap;

use super::noise::is_noise;
use super::plausibility::PlausibilityFilter;
use super::tokenizer::{extractable_parameters, find_values};
use super::units::resolve;
use crate::models::{ExtractedValue, ParameterKey, RawMatch, RejectedCandidate, Rejection};

/// Extraction result with the candidates that were seen and dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionOutcome {
    pub values: BTreeMap<ParameterKey, ExtractedValue>,
    pub rejected: Vec<RejectedCandidate>,
}

/// Scans document text for lab values.
///
/// Policy: the earliest accepted match for a parameter wins and later
/// mentions of it are not examined. A rejected candidate (unparseable or
/// implausible) does not block later candidates. Parameters are independent
/// of each other and may share a line.
#[derive(Debug, Clone, Default)]
pub struct ParameterExtractor {
    plausibility: PlausibilityFilter,
}

impl ParameterExtractor {
    pub fn new(plausibility: PlausibilityFilter) -> Self {
        Self { plausibility }
    }

    pub fn extract(&self, text: &str) -> BTreeMap<ParameterKey, ExtractedValue> {
        self.extract_with_diagnostics(text).values
    }

    pub fn extract_with_diagnostics(&self, text: &str) -> ExtractionOutcome {
        let mut outcome = ExtractionOutcome::default();
        let mut pending: Vec<ParameterKey> = extractable_parameters().collect();

        for line in text.lines().map(str::trim) {
            if pending.is_empty() {
                break;
            }
            if is_noise(line) {
                continue;
            }

            pending.retain(|&key| {
                for candidate in find_values(key, line) {
                    match self.accept(candidate) {
                        Ok(value) => {
                            tracing::debug!(
                                parameter = key.as_str(),
                                value = value.canonical_value,
                                converted = value.was_converted,
                                "Accepted lab value"
                            );
                            outcome.values.insert(key, value);
                            return false;
                        }
                        Err(rejected) => {
                            tracing::debug!(
                                parameter = key.as_str(),
                                raw = %rejected.raw.raw_numeric,
                                rejection = ?rejected.rejection,
                                "Discarded lab value candidate"
                            );
                            outcome.rejected.push(rejected);
                        }
                    }
                }
                true
            });
        }

        outcome
    }

    fn accept(&self, candidate: RawMatch) -> Result<ExtractedValue, RejectedCandidate> {
        let key = candidate.parameter_key;
        let Some(resolution) = resolve(key, &candidate.raw_numeric, &candidate.source_line) else {
            return Err(RejectedCandidate {
                raw: candidate,
                rejection: Rejection::ParseFailure,
            });
        };

        if !self
            .plausibility
            .is_plausible(key, Some(resolution.canonical_value))
        {
            return Err(RejectedCandidate {
                raw: candidate,
                rejection: Rejection::ImplausibleValue {
                    canonical_value: resolution.canonical_value,
                },
            });
        }

        Ok(ExtractedValue {
            parameter_key: key,
            raw_value: candidate.raw_numeric,
            canonical_value: resolution.canonical_value,
            unit_label: resolution.unit_label.map(str::to_string),
            was_converted: resolution.was_converted,
        })
    }
}
