pub mod memory;
pub mod resolve;
pub mod traits;

pub use memory::*;
pub use resolve::*;
pub use traits::*;
