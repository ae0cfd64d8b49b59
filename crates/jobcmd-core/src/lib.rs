//! Shared models and error types for Spark job command construction.

pub mod error;
pub mod model;
pub mod types;

pub use error::*;
pub use model::*;
pub use types::*;
