//! Unit disambiguation and conversion to canonical (mass) units.
//!
//! Reports mix mg/dL and mmol/L and often omit the unit. An explicit "mmol"
//! in the context line wins; otherwise a small raw magnitude is the only
//! signal that a value was reported in molar units.

use std::sync::LazyLock;

use regex::Regex;

use super::catalog::spec_for;
use crate::models::ParameterKey;

pub const MMOL_LABEL: &str = "mmol";
pub const SUSPECTED_MMOL_LABEL: &str = "suspected_mmol";

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d+(?:\.\d+)?").unwrap());

/// Outcome of resolving one raw numeric string.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub canonical_value: f64,
    pub unit_label: Option<&'static str>,
    pub was_converted: bool,
}

/// Parse the leading numeric run of `raw`, ignoring thousands separators
/// and anything after the number (`"7.2 g/dL"` → 7.2, `"250,000"` → 250000).
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    LEADING_NUMBER
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert `raw` for `key` into canonical units, using `context` (the
/// source line) to look for an explicit unit cue.
///
/// Returns `None` when `raw` has no leading number.
pub fn resolve(key: ParameterKey, raw: &str, context: &str) -> Option<Resolution> {
    let value = parse_leading_number(raw)?;
    let spec = spec_for(key);

    if let Some(multiplier) = spec.molar_multiplier {
        if context.to_lowercase().contains("mmol") {
            return Some(Resolution {
                canonical_value: round2(value * multiplier),
                unit_label: Some(MMOL_LABEL),
                was_converted: true,
            });
        }

        if spec.suspected_molar.is_some_and(|w| w.contains(value)) {
            return Some(Resolution {
                canonical_value: round2(value * multiplier),
                unit_label: Some(SUSPECTED_MMOL_LABEL),
                was_converted: true,
            });
        }
    }

    Some(Resolution {
        canonical_value: value,
        unit_label: None,
        was_converted: false,
    })
}
