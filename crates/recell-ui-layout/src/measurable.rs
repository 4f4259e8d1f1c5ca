//! Measurement contract for visual content.

use recell_ui_graphics::Size;

use crate::Constraints;

/// Something whose natural size can be queried under a set of constraints.
///
/// `measure` is a pure function of the content's current state: it must not
/// mutate layout state, and calling it twice with the same constraints
/// returns the same size until the content itself changes.
pub trait Measurable {
    /// Returns the natural size of the content within `constraints`.
    fn measure(&self, constraints: Constraints) -> Size;
}
