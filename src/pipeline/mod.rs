pub mod extraction;
pub mod parsing;
pub mod processor;
pub mod report_store;
