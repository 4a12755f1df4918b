use std::collections::BTreeMap;

use crate::models::{ExtractedValue, InterpretedValue, ParameterKey, SexCategory, Verdict};
use crate::pipeline::parsing::resolve_alias;

use super::reference::ReferenceRangeTable;

/// Flags values against a reference table.
///
/// Range choice when several exist for a parameter: the entry for the given
/// sex, else the sex-agnostic entry, else the first available entry in
/// male, female order. A value is always flagged when the table has any
/// range for its parameter.
#[derive(Debug, Clone, Copy)]
pub struct RangeInterpreter<'a> {
    table: &'a ReferenceRangeTable,
}

impl<'a> RangeInterpreter<'a> {
    pub fn new(table: &'a ReferenceRangeTable) -> Self {
        Self { table }
    }

    /// Classify `value` for a parameter given by name or alias
    /// (`"Hb"`, `"Platelet_Count"`, …). Unknown names yield `Unknown`.
    pub fn interpret(&self, name: &str, value: f64, sex: Option<&str>) -> Verdict {
        match resolve_alias(name) {
            Some(key) => self.interpret_key(key, value, sex.and_then(SexCategory::parse_lenient)),
            None => {
                tracing::debug!(name, "No parameter matches name");
                Verdict::Unknown
            }
        }
    }

    /// Like [`interpret`](Self::interpret) for a raw cell; non-numeric
    /// input yields `Unknown`.
    pub fn interpret_text(&self, name: &str, raw: &str, sex: Option<&str>) -> Verdict {
        match raw.trim().parse::<f64>() {
            Ok(value) => self.interpret(name, value, sex),
            Err(_) => Verdict::Unknown,
        }
    }

    pub fn interpret_key(&self, key: ParameterKey, value: f64, sex: Option<SexCategory>) -> Verdict {
        self.table
            .get(key)
            .and_then(|range| range.select(sex))
            .map_or(Verdict::Unknown, |interval| interval.classify(value))
    }

    /// Flag every extracted value of one document.
    pub fn interpret_all(
        &self,
        values: &BTreeMap<ParameterKey, ExtractedValue>,
        sex: Option<SexCategory>,
    ) -> BTreeMap<ParameterKey, InterpretedValue> {
        values
            .iter()
            .map(|(key, extracted)| {
                let value = extracted.canonical_value;
                let flag = self.interpret_key(*key, value, sex);
                (*key, InterpretedValue { value, flag })
            })
            .collect()
    }
}
