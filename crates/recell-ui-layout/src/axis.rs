use recell_ui_graphics::Size;

/// Represents the primary axis of a linear container (row or column).
///
/// For a cell hosted in a fixed-capacity container, this is the axis the
/// container fixes: a `Horizontal` cell has its height constrained and is
/// free to grow in width, and vice versa for `Vertical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal main axis.
    /// Free axis: width. Constrained axis: height.
    Horizontal,

    /// Vertical main axis.
    /// Free axis: height. Constrained axis: width.
    Vertical,
}

impl Axis {
    /// Returns the opposite axis.
    #[inline]
    pub fn cross_axis(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Returns true if this is the horizontal axis.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Horizontal)
    }

    /// Returns true if this is the vertical axis.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Axis::Vertical)
    }

    /// Returns `size`'s measurement along this axis.
    #[inline]
    pub fn component(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }
}
