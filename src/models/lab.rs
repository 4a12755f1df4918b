use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use super::enums::{ParameterKey, Verdict};

/// A candidate value found next to a parameter mention, before unit
/// resolution. Lives only for the duration of one extraction pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawMatch {
    #[serde(rename = "parameter")]
    pub parameter_key: ParameterKey,
    #[serde(rename = "raw")]
    pub raw_numeric: String,
    #[serde(rename = "line")]
    pub source_line: String,
}

/// An accepted lab value in canonical units.
///
/// Serialized with the field names used by persisted reports
/// (`value_raw`, `value`, `unit`, `converted`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedValue {
    #[serde(skip_serializing)]
    pub parameter_key: ParameterKey,
    #[serde(rename = "value_raw")]
    pub raw_value: String,
    #[serde(rename = "value")]
    pub canonical_value: f64,
    #[serde(rename = "unit")]
    pub unit_label: Option<String>,
    #[serde(rename = "converted")]
    pub was_converted: bool,
}

/// Why a candidate was discarded by the extractor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// No leading numeric run in the captured token.
    ParseFailure,
    /// Parsed, but outside what the parameter can physically be.
    ImplausibleValue { canonical_value: f64 },
}

/// A candidate the extractor saw and dropped. Kept for diagnostics only;
/// rejected candidates never enter the parameter map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedCandidate {
    pub raw: RawMatch,
    pub rejection: Rejection,
}

/// Value + flag pair in the `interpreted` section of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretedValue {
    pub value: f64,
    pub flag: Verdict,
}

/// Per-document output handed to persistence.
#[derive(Debug, Clone, Serialize)]
pub struct LabReport {
    pub id: Uuid,
    pub file: String,
    pub parsed_simple: BTreeMap<ParameterKey, f64>,
    pub parsed_detailed: BTreeMap<ParameterKey, ExtractedValue>,
    pub interpreted: BTreeMap<ParameterKey, InterpretedValue>,
    /// Local time, `YYYYMMDD_HHMMSS`.
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracted_value_serializes_report_field_names() {
        let value = ExtractedValue {
            parameter_key: ParameterKey::Glucose,
            raw_value: "5.5".into(),
            canonical_value: 99.0,
            unit_label: Some("mmol".into()),
            was_converted: true,
        };
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["value_raw"], "5.5");
        assert_eq!(json["value"], 99.0);
        assert_eq!(json["unit"], "mmol");
        assert_eq!(json["converted"], true);
        assert!(json.get("parameter_key").is_none());
    }

    #[test]
    fn rejection_is_tagged() {
        let json = serde_json::to_value(Rejection::ImplausibleValue {
            canonical_value: 2020.0,
        })
        .unwrap();
        assert_eq!(json["reason"], "implausible_value");
        assert_eq!(json["canonical_value"], 2020.0);
    }
}
