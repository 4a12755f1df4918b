//! Assessment of already-loaded tabular rows (one CSV record as
//! column → cell text). Column headers are mapped to parameters with the
//! same aliases the range interpreter uses.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{ParameterKey, SexCategory, Verdict};
use crate::pipeline::parsing::{resolve_alias, PlausibilityFilter};

use super::interpret::RangeInterpreter;

/// Cell spellings treated as an absent value.
const MISSING_MARKERS: &[&str] = &["", "na", "n/a", "nan", "null", "none", "-"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CellFinding {
    Missing,
    Invalid { raw: String },
    Implausible { value: f64 },
    Assessed { value: f64, verdict: Verdict },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnAssessment {
    pub column: String,
    pub parameter: ParameterKey,
    pub finding: CellFinding,
}

impl ColumnAssessment {
    pub fn is_issue(&self) -> bool {
        !matches!(
            self.finding,
            CellFinding::Assessed {
                verdict: Verdict::Normal,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowAssessment {
    pub sex: Option<SexCategory>,
    pub columns: Vec<ColumnAssessment>,
}

impl RowAssessment {
    /// Findings other than a normal verdict.
    pub fn issues(&self) -> impl Iterator<Item = &ColumnAssessment> {
        self.columns.iter().filter(|c| c.is_issue())
    }
}

pub struct RowAssessor<'a> {
    interpreter: RangeInterpreter<'a>,
    plausibility: &'a PlausibilityFilter,
}

impl<'a> RowAssessor<'a> {
    pub fn new(interpreter: RangeInterpreter<'a>, plausibility: &'a PlausibilityFilter) -> Self {
        Self {
            interpreter,
            plausibility,
        }
    }

    /// Assess every column of `row` that names a known parameter.
    /// `sex_column`, when present in the row, supplies the sex used to pick
    /// reference ranges.
    pub fn assess_row(
        &self,
        row: &BTreeMap<String, String>,
        sex_column: Option<&str>,
    ) -> RowAssessment {
        let sex = sex_column
            .and_then(|col| row.get(col))
            .and_then(|cell| SexCategory::parse_lenient(cell));

        let columns = row
            .iter()
            .filter(|(column, _)| Some(column.as_str()) != sex_column)
            .filter_map(|(column, cell)| {
                let parameter = resolve_alias(column)?;
                Some(ColumnAssessment {
                    column: column.clone(),
                    parameter,
                    finding: self.assess_cell(parameter, cell, sex),
                })
            })
            .collect();

        RowAssessment { sex, columns }
    }

    fn assess_cell(&self, key: ParameterKey, cell: &str, sex: Option<SexCategory>) -> CellFinding {
        let trimmed = cell.trim();
        if MISSING_MARKERS.contains(&trimmed.to_lowercase().as_str()) {
            return CellFinding::Missing;
        }
        let Ok(value) = trimmed.replace(',', "").parse::<f64>() else {
            return CellFinding::Invalid {
                raw: trimmed.to_string(),
            };
        };
        if !self.plausibility.is_plausible(key, Some(value)) {
            return CellFinding::Implausible { value };
        }
        CellFinding::Assessed {
            value,
            verdict: self.interpreter.interpret_key(key, value, sex),
        }
    }
}
