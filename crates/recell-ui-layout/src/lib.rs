//! Layout contracts for Recell

mod axis;
mod constraints;
mod measurable;

pub use axis::*;
pub use constraints::*;
pub use measurable::*;

pub mod prelude {
    pub use crate::axis::Axis;
    pub use crate::constraints::Constraints;
    pub use crate::measurable::Measurable;
}
