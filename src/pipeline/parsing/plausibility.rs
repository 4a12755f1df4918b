use std::collections::BTreeMap;

use super::catalog::CATALOG;
use crate::models::ParameterKey;

/// Calendar years are the most common mis-capture in report headers and
/// footers; rejected for every parameter.
const YEAR_RANGE: (f64, f64) = (1900.0, 2100.0);

/// Bounds applied to parameters without a registered interval.
const DEFAULT_BOUNDS: (f64, f64) = (0.0, 10_000.0);

/// Rejects values no measurement could produce. Used only to discard
/// extractions, never to classify them.
#[derive(Debug, Clone)]
pub struct PlausibilityFilter {
    bounds: BTreeMap<ParameterKey, (f64, f64)>,
}

impl Default for PlausibilityFilter {
    fn default() -> Self {
        Self::from_catalog()
    }
}

impl PlausibilityFilter {
    pub fn from_catalog() -> Self {
        let bounds = CATALOG
            .iter()
            .filter_map(|spec| spec.physical_bounds.map(|b| (spec.key, b)))
            .collect();
        Self { bounds }
    }

    pub fn bounds_for(&self, key: ParameterKey) -> (f64, f64) {
        self.bounds.get(&key).copied().unwrap_or(DEFAULT_BOUNDS)
    }

    pub fn is_plausible(&self, key: ParameterKey, value: Option<f64>) -> bool {
        let Some(v) = value else {
            return false;
        };
        if !v.is_finite() {
            return false;
        }
        if (YEAR_RANGE.0..=YEAR_RANGE.1).contains(&v) {
            return false;
        }
        if v < 0.0 {
            return false;
        }
        let (lo, hi) = self.bounds_for(key);
        (lo..=hi).contains(&v)
    }
}
