pub mod types;
pub mod reference;
pub mod interpret;
pub mod guideline;
pub mod tabular;

pub use types::*;
pub use reference::ReferenceRangeTable;
pub use interpret::RangeInterpreter;
pub use guideline::learn;
pub use tabular::*;
