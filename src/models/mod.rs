pub mod enums;
pub mod lab;
pub mod range;

pub use enums::*;
pub use lab::*;
pub use range::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Invalid reference interval: low {low} must be below high {high}")]
    InvalidInterval { low: f64, high: f64 },

    #[error("Reference range has no intervals")]
    EmptyRange,
}
