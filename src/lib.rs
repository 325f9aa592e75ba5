pub mod api;
pub mod bayes;
pub mod chart;
pub mod config;
pub mod diff;
pub mod error;
pub mod records;
pub mod scorer;
pub mod summary;

pub use error::{ExplainError, ExplainResult};
