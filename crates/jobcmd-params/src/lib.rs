//! Task payload decoding and parameter placeholder handling.

pub mod decode;
pub mod merge;
pub mod parameters;
pub mod placeholder;
pub mod time_expr;

pub use decode::*;
pub use merge::*;
pub use parameters::*;
pub use placeholder::*;
