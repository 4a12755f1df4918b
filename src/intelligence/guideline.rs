//! Learns reference ranges from guideline documents.
//!
//! Guidelines state ranges as "Hemoglobin (g/dL) 12.0 – 16.5". Each
//! parameter with a range mention in the catalog gets one pattern; the
//! last accepted interval across all documents wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Interval, ParameterKey};
use crate::pipeline::parsing::CATALOG;

use super::types::RangeDelta;

/// Learned bounds must satisfy `0 < low < high < MAX_LEARNED_BOUND`.
const MAX_LEARNED_BOUND: f64 = 10_000.0;

static RANGE_PATTERNS: LazyLock<Vec<(ParameterKey, Regex)>> = LazyLock::new(|| {
    CATALOG
        .iter()
        .filter_map(|spec| {
            let mention = spec.range_mention?;
            let pattern = format!(
                r"(?i)\b(?:{mention})\b[^0-9]{{0,30}}([0-9]+(?:\.[0-9]+)?)\s*[–\-]\s*([0-9]+(?:\.[0-9]+)?)"
            );
            Some((spec.key, Regex::new(&pattern).unwrap()))
        })
        .collect()
});

/// Scan guideline texts and return the intervals they define.
///
/// Pure: the caller decides whether to merge the result into a table
/// (see `ReferenceRangeTable::merge_learned`).
pub fn learn<I, S>(documents: I) -> RangeDelta
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut learned = RangeDelta::new();

    for (doc_index, document) in documents.into_iter().enumerate() {
        let text = document.as_ref();
        for (key, regex) in RANGE_PATTERNS.iter() {
            for caps in regex.captures_iter(text) {
                let (Some(low), Some(high)) = (caps.get(1), caps.get(2)) else {
                    continue;
                };
                let (Ok(low), Ok(high)) = (low.as_str().parse::<f64>(), high.as_str().parse::<f64>())
                else {
                    continue;
                };
                if !(0.0 < low && low < high && high < MAX_LEARNED_BOUND) {
                    tracing::debug!(
                        parameter = key.as_str(),
                        low,
                        high,
                        "Ignoring out-of-bounds guideline range"
                    );
                    continue;
                }
                if let Ok(interval) = Interval::new(low, high) {
                    tracing::debug!(
                        parameter = key.as_str(),
                        document = doc_index,
                        low,
                        high,
                        "Learned guideline range"
                    );
                    learned.insert(*key, interval);
                }
            }
        }
    }

    learned
}
