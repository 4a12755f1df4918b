use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::enums::{SexCategory, Verdict};
use super::ModelError;

/// A closed reference interval. Always `low < high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Interval {
    low: f64,
    high: f64,
}

impl Interval {
    pub fn new(low: f64, high: f64) -> Result<Self, ModelError> {
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(ModelError::InvalidInterval { low, high });
        }
        Ok(Self { low, high })
    }

    /// For built-in tables only; `low < high` is checked by their tests.
    pub(crate) const fn from_bounds(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Bounds are inclusive on the normal side.
    pub fn classify(&self, value: f64) -> Verdict {
        if !value.is_finite() {
            Verdict::Unknown
        } else if value < self.low {
            Verdict::Low
        } else if value > self.high {
            Verdict::High
        } else {
            Verdict::Normal
        }
    }
}

impl TryFrom<(f64, f64)> for Interval {
    type Error = ModelError;

    fn try_from((low, high): (f64, f64)) -> Result<Self, Self::Error> {
        Interval::new(low, high)
    }
}

impl From<Interval> for (f64, f64) {
    fn from(iv: Interval) -> Self {
        (iv.low, iv.high)
    }
}

/// Reference ranges for one parameter, keyed by sex category.
/// A plain sex-agnostic interval is stored under [`SexCategory::Any`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeSpec", into = "BTreeMap<SexCategory, Interval>")]
pub struct ReferenceRange {
    entries: BTreeMap<SexCategory, Interval>,
}

/// Accepted config shapes: `[low, high]` or `{"male": [..], "any": [..]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RangeSpec {
    Single(Interval),
    BySex(BTreeMap<SexCategory, Interval>),
}

impl TryFrom<RangeSpec> for ReferenceRange {
    type Error = ModelError;

    fn try_from(spec: RangeSpec) -> Result<Self, Self::Error> {
        match spec {
            RangeSpec::Single(iv) => Ok(Self::single(iv)),
            RangeSpec::BySex(entries) if entries.is_empty() => Err(ModelError::EmptyRange),
            RangeSpec::BySex(entries) => Ok(Self { entries }),
        }
    }
}

impl From<ReferenceRange> for BTreeMap<SexCategory, Interval> {
    fn from(range: ReferenceRange) -> Self {
        range.entries
    }
}

impl ReferenceRange {
    pub fn single(interval: Interval) -> Self {
        Self {
            entries: BTreeMap::from([(SexCategory::Any, interval)]),
        }
    }

    pub fn by_sex(entries: impl IntoIterator<Item = (SexCategory, Interval)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, sex: SexCategory) -> Option<Interval> {
        self.entries.get(&sex).copied()
    }

    /// Pick the interval to classify against:
    /// the sex-specific entry when `sex` is given and present, else `any`,
    /// else the first available entry (male, female, any order).
    pub fn select(&self, sex: Option<SexCategory>) -> Option<Interval> {
        sex.and_then(|s| self.get(s))
            .or_else(|| self.get(SexCategory::Any))
            .or_else(|| self.entries.values().next().copied())
    }

    /// Replace or insert the sex-agnostic entry; sex-specific entries stay.
    pub fn set_any(&mut self, interval: Interval) {
        self.entries.insert(SexCategory::Any, interval);
    }

    /// Overlay another range entry by entry.
    pub fn overlay(&mut self, other: &ReferenceRange) {
        for (sex, iv) in &other.entries {
            self.entries.insert(*sex, *iv);
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (SexCategory, Interval)> + '_ {
        self.entries.iter().map(|(s, iv)| (*s, *iv))
    }
}
