//! Fixed-capacity cells that host a measured visual node.
//!
//! A cell fixes one layout axis (the constrained axis) and lets its
//! content grow along the other (the free axis). On each layout pass the
//! host asks the cell whether the content's natural size has drifted from
//! the size last reported, and resizes the cell's slot only when it has.

use recell_foundation::{NodeHandle, VisualNode};
use recell_ui_graphics::{Rect, Size};
use recell_ui_layout::{Axis, Constraints, Measurable};

/// What the cell is used for within the host layout.
///
/// `Supplemental` cells (headers, footers) honor an explicit size request
/// from their content on the free axis; `Item` cells always follow the
/// measured value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellRole {
    Item,
    Supplemental,
}

/// A reusable container holding exactly one visual node.
///
/// Cells are pooled: `prepare_for_reuse` resets the binding for the next
/// logical item, it never destroys the hosted node (the host's tree owns
/// node lifetime).
pub struct TemplatedCell {
    orientation: Axis,
    role: CellRole,
    content: Option<NodeHandle>,
    constrained_dimension: f32,
    last_reported_size: Size,
}

impl TemplatedCell {
    pub fn new(orientation: Axis, role: CellRole) -> Self {
        Self {
            orientation,
            role,
            content: None,
            constrained_dimension: 0.0,
            last_reported_size: Size::ZERO,
        }
    }

    pub fn orientation(&self) -> Axis {
        self.orientation
    }

    pub fn role(&self) -> CellRole {
        self.role
    }

    /// The length of the axis fixed by the container. Never negative.
    pub fn constrained_dimension(&self) -> f32 {
        self.constrained_dimension
    }

    /// The size most recently returned by [`measure`](Self::measure).
    pub fn last_reported_size(&self) -> Size {
        self.last_reported_size
    }

    /// Binds the node this cell presents.
    pub fn bind(&mut self, content: NodeHandle) {
        self.content = Some(content);
    }

    pub fn content(&self) -> Option<&NodeHandle> {
        self.content.as_ref()
    }

    /// Resets the cell for its next logical item.
    pub fn prepare_for_reuse(&mut self) {
        self.content = None;
        self.constrained_dimension = 0.0;
        self.last_reported_size = Size::ZERO;
    }

    /// Measures the hosted node with the free axis unbounded and the
    /// constrained axis fixed, and reports the cell size: the measured
    /// value on the free axis, the constrained dimension on the other.
    ///
    /// Returns `Size::ZERO` when no node is bound.
    pub fn measure(&mut self) -> Size {
        let Some(content) = self.content.clone() else {
            return Size::ZERO;
        };

        let measured =
            measure_including_margin(&content, self.natural_constraints(self.constrained_dimension));
        let free = self.free_axis_value(&content, self.orientation.component(measured));

        let size = match self.orientation {
            Axis::Horizontal => Size::new(free, self.constrained_dimension),
            Axis::Vertical => Size::new(self.constrained_dimension, free),
        };

        self.last_reported_size = size;
        size
    }

    /// Fixes the constrained dimension from `constraint` and lays the
    /// content out at its freshly measured size.
    pub fn constrain_to(&mut self, constraint: Size) {
        self.constrained_dimension = self.orientation.cross_axis().component(constraint).max(0.0);
        self.layout();
    }

    /// Decides whether the hosted node's natural size has drifted from
    /// `current_size`, the size last communicated to the host layout.
    ///
    /// Returns `None` when the cell should keep its current size: no node
    /// is bound, the node has not been laid out yet (zero-area bounds), or
    /// the natural free-axis value still matches exactly. Otherwise
    /// returns the size the cell must be resized to.
    ///
    /// The comparison is exact float equality. Sub-pixel jitter in content
    /// measurement can therefore trigger a re-layout; tolerating that is
    /// cheaper than the stale-size artifacts an epsilon would hide.
    ///
    /// This is a pure decision: resizing and re-layout are the caller's
    /// job, via [`constrain_to`](Self::constrain_to).
    pub fn content_size_update(&self, current_size: Size) -> Option<Size> {
        let content = self.content.as_ref()?;

        if !content.borrow().bounds().has_area() {
            return None;
        }

        let fixed = self.orientation.cross_axis().component(current_size);
        let mut desired = measure_including_margin(content, self.natural_constraints(fixed));

        let free = self.free_axis_value(content, self.orientation.component(desired));
        match self.orientation {
            Axis::Horizontal => desired.width = free,
            Axis::Vertical => desired.height = free,
        }

        if free == self.orientation.component(current_size) {
            return None;
        }
        Some(desired)
    }

    /// Constraints for a natural-size measurement: unbounded along the
    /// free axis, `fixed` along the constrained axis.
    fn natural_constraints(&self, fixed: f32) -> Constraints {
        match self.orientation {
            Axis::Horizontal => Constraints::loose(f32::INFINITY, fixed),
            Axis::Vertical => Constraints::loose(fixed, f32::INFINITY),
        }
    }

    /// Resolves the free-axis value, letting a positive explicit override
    /// win for supplemental cells.
    fn free_axis_value(&self, content: &NodeHandle, measured: f32) -> f32 {
        if self.role != CellRole::Supplemental {
            return measured;
        }
        let node = content.borrow();
        let requested = match self.orientation {
            Axis::Horizontal => node.width_override(),
            Axis::Vertical => node.height_override(),
        };
        requested.filter(|value| *value > 0.0).unwrap_or(measured)
    }

    fn layout(&mut self) {
        let Some(content) = self.content.clone() else {
            return;
        };
        let size = self.measure();

        let mut node = content.borrow_mut();
        let margin = node.margin();
        node.set_bounds(Rect {
            x: margin.left,
            y: margin.top,
            width: (size.width - margin.horizontal_sum()).max(0.0),
            height: (size.height - margin.vertical_sum()).max(0.0),
        });
    }
}

/// Measures `node` and adds its margins back onto the result, matching the
/// margin-inclusive measurement the host layout works in.
fn measure_including_margin(node: &NodeHandle, constraints: Constraints) -> Size {
    let node = node.borrow();
    let margin = node.margin();
    let inner = node.measure(constraints.deflate(margin.horizontal_sum(), margin.vertical_sum()));
    Size::new(
        inner.width + margin.horizontal_sum(),
        inner.height + margin.vertical_sum(),
    )
}
