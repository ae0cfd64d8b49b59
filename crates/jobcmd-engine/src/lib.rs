pub mod builder;
pub mod config;
pub mod engine;
pub mod spark;

pub use builder::*;
pub use config::*;
pub use engine::*;
pub use spark::*;
