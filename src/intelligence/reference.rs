use std::collections::BTreeMap;
use std::path::Path;

use crate::models::{Interval, ParameterKey, ReferenceRange, SexCategory};

use super::types::{RangeDelta, RangeError};

/// Clinical reference ranges used to flag values low/normal/high.
///
/// Built-in defaults are always present. Guideline learning and JSON
/// overrides only replace or add entries. Mutate during setup, then share
/// by reference for interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRangeTable {
    ranges: BTreeMap<ParameterKey, ReferenceRange>,
}

impl Default for ReferenceRangeTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

const fn iv(low: f64, high: f64) -> Interval {
    Interval::from_bounds(low, high)
}

impl ReferenceRangeTable {
    pub fn empty() -> Self {
        Self {
            ranges: BTreeMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        use SexCategory::{Female, Male};

        let ranges = BTreeMap::from([
            (
                ParameterKey::Hemoglobin,
                ReferenceRange::by_sex([(Male, iv(13.0, 17.0)), (Female, iv(12.0, 15.5))]),
            ),
            (ParameterKey::Glucose, ReferenceRange::single(iv(70.0, 99.0))),
            (ParameterKey::Cholesterol, ReferenceRange::single(iv(0.0, 200.0))),
            (
                ParameterKey::RbcCount,
                ReferenceRange::by_sex([(Male, iv(4.5, 5.5)), (Female, iv(4.2, 5.4))]),
            ),
            (
                ParameterKey::PlateletCount,
                ReferenceRange::single(iv(150_000.0, 410_000.0)),
            ),
            (ParameterKey::WbcCount, ReferenceRange::single(iv(4_000.0, 11_000.0))),
            (ParameterKey::Mcv, ReferenceRange::single(iv(80.0, 100.0))),
            (ParameterKey::Mch, ReferenceRange::single(iv(27.0, 33.0))),
            (ParameterKey::Mchc, ReferenceRange::single(iv(32.0, 36.0))),
        ]);
        Self { ranges }
    }

    pub fn get(&self, key: ParameterKey) -> Option<&ReferenceRange> {
        self.ranges.get(&key)
    }

    pub fn insert(&mut self, key: ParameterKey, range: ReferenceRange) {
        self.ranges.insert(key, range);
    }

    /// Apply intervals learned from guidelines. Each replaces (or creates)
    /// the parameter's `any` entry; sex-specific entries are kept.
    pub fn merge_learned(&mut self, delta: &RangeDelta) {
        for (key, interval) in delta {
            match self.ranges.get_mut(key) {
                Some(range) => range.set_any(*interval),
                None => {
                    self.ranges.insert(*key, ReferenceRange::single(*interval));
                }
            }
        }
        if !delta.is_empty() {
            tracing::info!(
                parameters = ?delta.keys().map(|k| k.as_str()).collect::<Vec<_>>(),
                "Updated reference ranges from guidelines"
            );
        }
    }

    /// Overlay configured ranges entry by entry.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<ParameterKey, ReferenceRange>) {
        for (key, range) in overrides {
            match self.ranges.get_mut(key) {
                Some(existing) => existing.overlay(range),
                None => {
                    self.ranges.insert(*key, range.clone());
                }
            }
        }
    }

    /// Load range overrides from a JSON object keyed by parameter name.
    pub fn load_overrides(path: &Path) -> Result<BTreeMap<ParameterKey, ReferenceRange>, RangeError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            RangeError::ReferenceDataLoad(path.display().to_string(), e.to_string())
        })?;
        serde_json::from_str(&json).map_err(|e| {
            RangeError::ReferenceDataParse(path.display().to_string(), e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_respect_interval_invariant() {
        let table = ReferenceRangeTable::with_defaults();
        for key in ParameterKey::ALL {
            let range = table.get(key).unwrap();
            for (_, interval) in range.entries() {
                assert!(interval.low() < interval.high(), "{key}");
            }
        }
    }

    #[test]
    fn merge_replaces_any_and_keeps_sex_entries() {
        let mut table = ReferenceRangeTable::with_defaults();
        let delta = RangeDelta::from([(
            ParameterKey::Hemoglobin,
            Interval::new(12.0, 16.5).unwrap(),
        )]);
        table.merge_learned(&delta);

        let hb = table.get(ParameterKey::Hemoglobin).unwrap();
        assert_eq!(hb.get(SexCategory::Any), Some(Interval::new(12.0, 16.5).unwrap()));
        assert_eq!(hb.get(SexCategory::Male), Some(Interval::new(13.0, 17.0).unwrap()));
    }

    #[test]
    fn merge_inserts_missing_parameters() {
        let mut table = ReferenceRangeTable::empty();
        let delta = RangeDelta::from([(ParameterKey::Glucose, Interval::new(70.0, 100.0).unwrap())]);
        table.merge_learned(&delta);
        assert_eq!(
            table.get(ParameterKey::Glucose).unwrap().get(SexCategory::Any),
            Some(Interval::new(70.0, 100.0).unwrap())
        );
    }

    #[test]
    fn load_overrides_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranges.json");
        std::fs::write(
            &path,
            r#"{"glucose": [70, 100], "hemoglobin": {"female": [11.5, 15.0]}}"#,
        )
        .unwrap();

        let overrides = ReferenceRangeTable::load_overrides(&path).unwrap();
        let mut table = ReferenceRangeTable::with_defaults();
        table.apply_overrides(&overrides);

        let hb = table.get(ParameterKey::Hemoglobin).unwrap();
        assert_eq!(hb.get(SexCategory::Female), Some(Interval::new(11.5, 15.0).unwrap()));
        assert_eq!(hb.get(SexCategory::Male), Some(Interval::new(13.0, 17.0).unwrap()));
        assert_eq!(
            table.get(ParameterKey::Glucose).unwrap().get(SexCategory::Any),
            Some(Interval::new(70.0, 100.0).unwrap())
        );
    }

    #[test]
    fn load_overrides_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranges.json");
        std::fs::write(&path, r#"{"glucose": [100, 70]}"#).unwrap();
        assert!(matches!(
            ReferenceRangeTable::load_overrides(&path),
            Err(RangeError::ReferenceDataParse(_, _))
        ));
    }

    #[test]
    fn load_overrides_reports_missing_file() {
        let missing = Path::new("/nonexistent/labsift/ranges.json");
        assert!(matches!(
            ReferenceRangeTable::load_overrides(missing),
            Err(RangeError::ReferenceDataLoad(_, _))
        ));
    }
}
