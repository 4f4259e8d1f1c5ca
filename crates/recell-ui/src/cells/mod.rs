//! Templated cells and their reuse pool.

mod pool;
mod templated;

pub use pool::*;
pub use templated::*;
