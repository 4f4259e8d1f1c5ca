//! Visual tree nodes and capabilities for Recell

mod node;
mod scrollable;

pub use node::*;
pub use scrollable::*;
