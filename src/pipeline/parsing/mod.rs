//! Text-to-structured-value extraction: line filtering, value tokenizing,
//! unit resolution and plausibility checks, driven per document by
//! [`ParameterExtractor`].

pub mod catalog;
pub mod noise;
pub mod tokenizer;
pub mod units;
pub mod plausibility;
pub mod orchestrator;

pub use catalog::{resolve_alias, spec_for, ParameterSpec, CATALOG};
pub use noise::is_noise;
pub use orchestrator::*;
pub use plausibility::PlausibilityFilter;
pub use units::{parse_leading_number, resolve, Resolution};
