use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::{Interval, ParameterKey};

/// Sex-agnostic intervals discovered in guideline documents, keyed by
/// parameter. Merged into a reference table by the caller.
pub type RangeDelta = BTreeMap<ParameterKey, Interval>;

#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Failed to load reference data from {0}: {1}")]
    ReferenceDataLoad(String, String),

    #[error("Failed to parse reference data {0}: {1}")]
    ReferenceDataParse(String, String),
}
