use std::sync::LazyLock;

use regex::Regex;

use super::catalog::CATALOG;
use crate::models::{ParameterKey, RawMatch};

/// Characters allowed between a mention and its value (unit labels,
/// colons, brackets). Digits and '-' stop the gap so ranges and dates are
/// not skipped over.
const MAX_GAP: usize = 15;

/// Compiled mention+value pattern for every extractable parameter,
/// in catalog order.
static VALUE_PATTERNS: LazyLock<Vec<(ParameterKey, Regex)>> = LazyLock::new(|| {
    CATALOG
        .iter()
        .filter_map(|spec| {
            let mention = spec.mention?;
            let pattern = format!(
                r"(?i)\b(?:{mention})\b[^\d\-]{{0,{MAX_GAP}}}({})",
                spec.token.pattern()
            );
            Some((spec.key, Regex::new(&pattern).unwrap()))
        })
        .collect()
});

/// Parameters that can be found in free text.
pub fn extractable_parameters() -> impl Iterator<Item = ParameterKey> {
    VALUE_PATTERNS.iter().map(|(key, _)| *key)
}

/// Every numeric token following a mention of `key` on `line`, left to right.
/// Yields nothing for parameters without a text pattern.
pub fn find_values(key: ParameterKey, line: &str) -> Vec<RawMatch> {
    let Some((_, regex)) = VALUE_PATTERNS.iter().find(|(k, _)| *k == key) else {
        return Vec::new();
    };
    regex
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| RawMatch {
            parameter_key: key,
            raw_numeric: m.as_str().to_string(),
            source_line: line.to_string(),
        })
        .collect()
}

/// First numeric token following a mention of `key`, if any.
pub fn first_value(key: ParameterKey, line: &str) -> Option<RawMatch> {
    find_values(key, line).into_iter().next()
}
