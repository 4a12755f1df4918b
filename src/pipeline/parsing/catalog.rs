//! Declarative per-parameter table.
//!
//! Every component (tokenizer, unit resolver, plausibility filter, range
//! interpreter) looks parameters up here instead of matching on names itself.

use crate::models::ParameterKey;

/// Shape of the numeric token captured after a parameter mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericToken {
    /// Integer or decimal (`13`, `13.5`).
    Decimal,
    /// Cell counts: 4–8 plain digits or comma-grouped thousands (`250,000`).
    /// Keeps stray small numbers from being read as counts.
    Count,
}

impl NumericToken {
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Decimal => r"[0-9]+(?:\.[0-9]+)?",
            Self::Count => r"[0-9]{1,3}(?:,[0-9]{3}){1,2}|[0-9]{4,8}",
        }
    }
}

/// Raw-magnitude window in which an unlabelled value is assumed to be
/// reported in mmol/L. `min` inclusive, `below` exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MolarWindow {
    pub min: f64,
    pub below: f64,
}

impl MolarWindow {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.below
    }
}

#[derive(Debug)]
pub struct ParameterSpec {
    pub key: ParameterKey,
    /// Regex alternation of mention tokens used to find values in report text.
    /// `None` means the parameter is only interpreted, never extracted from text.
    pub mention: Option<&'static str>,
    pub token: NumericToken,
    /// Mention tokens recognised in guideline "name low - high" ranges.
    pub range_mention: Option<&'static str>,
    /// Name resolution groups: a group matches when every part is a
    /// substring of the lowercased name.
    pub aliases: &'static [&'static [&'static str]],
    /// mmol/L → mg/dL multiplier.
    pub molar_multiplier: Option<f64>,
    pub suspected_molar: Option<MolarWindow>,
    /// Physically possible canonical values, inclusive.
    pub physical_bounds: Option<(f64, f64)>,
}

/// Catalog order is alias resolution order (`mchc` must precede `mch`).
pub static CATALOG: [ParameterSpec; 9] = [
    ParameterSpec {
        key: ParameterKey::Hemoglobin,
        mention: Some(r"ha?emoglobin|hgb|hb"),
        token: NumericToken::Decimal,
        range_mention: Some(r"ha?emoglobin|hb"),
        aliases: &[&["hb"], &["hemoglobin"], &["haemoglobin"]],
        molar_multiplier: None,
        suspected_molar: None,
        physical_bounds: Some((0.1, 30.0)),
    },
    ParameterSpec {
        key: ParameterKey::Glucose,
        mention: Some(r"glucose|blood sugar"),
        token: NumericToken::Decimal,
        range_mention: Some(r"glucose"),
        aliases: &[&["glucose"]],
        molar_multiplier: Some(18.0),
        suspected_molar: Some(MolarWindow { min: 0.5, below: 40.0 }),
        physical_bounds: Some((0.1, 1000.0)),
    },
    ParameterSpec {
        key: ParameterKey::Cholesterol,
        mention: Some(r"total cholesterol|cholesterol|t\.chol"),
        token: NumericToken::Decimal,
        range_mention: Some(r"cholesterol"),
        aliases: &[&["chol"]],
        molar_multiplier: Some(38.67),
        suspected_molar: Some(MolarWindow { min: 0.2, below: 15.0 }),
        physical_bounds: Some((10.0, 1000.0)),
    },
    ParameterSpec {
        key: ParameterKey::RbcCount,
        mention: Some(r"rbc(?:\s+count)?|red blood cells?|erythrocytes"),
        token: NumericToken::Decimal,
        range_mention: None,
        aliases: &[&["rbc", "count"], &["red_blood_cell"], &["red blood cell"]],
        molar_multiplier: None,
        suspected_molar: None,
        physical_bounds: Some((0.1, 50.0)),
    },
    ParameterSpec {
        key: ParameterKey::PlateletCount,
        mention: Some(r"platelet(?:s|_count|\s+count)?"),
        token: NumericToken::Count,
        range_mention: None,
        aliases: &[&["platelet"]],
        molar_multiplier: None,
        suspected_molar: None,
        physical_bounds: Some((1000.0, 10_000_000.0)),
    },
    ParameterSpec {
        key: ParameterKey::WbcCount,
        mention: None,
        token: NumericToken::Decimal,
        range_mention: None,
        aliases: &[&["wbc"], &["white_blood_cell"], &["white blood cell"]],
        molar_multiplier: None,
        suspected_molar: None,
        physical_bounds: None,
    },
    ParameterSpec {
        key: ParameterKey::Mchc,
        mention: None,
        token: NumericToken::Decimal,
        range_mention: None,
        aliases: &[&["mchc"]],
        molar_multiplier: None,
        suspected_molar: None,
        physical_bounds: None,
    },
    ParameterSpec {
        key: ParameterKey::Mcv,
        mention: None,
        token: NumericToken::Decimal,
        range_mention: None,
        aliases: &[&["mcv"]],
        molar_multiplier: None,
        suspected_molar: None,
        physical_bounds: None,
    },
    ParameterSpec {
        key: ParameterKey::Mch,
        mention: None,
        token: NumericToken::Decimal,
        range_mention: None,
        aliases: &[&["mch"]],
        molar_multiplier: None,
        suspected_molar: None,
        physical_bounds: None,
    },
];

pub fn spec_for(key: ParameterKey) -> &'static ParameterSpec {
    // CATALOG holds exactly one entry per key, in ParameterKey::ALL order.
    &CATALOG[key as usize]
}

/// Map a free-form parameter name or column header to its canonical key.
pub fn resolve_alias(name: &str) -> Option<ParameterKey> {
    let lower = name.to_lowercase();
    CATALOG
        .iter()
        .find(|spec| {
            spec.aliases
                .iter()
                .any(|group| group.iter().all(|part| lower.contains(part)))
        })
        .map(|spec| spec.key)
}
