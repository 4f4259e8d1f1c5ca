//! Retained visual-node tree.
//!
//! The tree is opaque to the adapters built on top of it: they only see
//! `VisualNode`, walk `children()` in index order, and resolve optional
//! capabilities through a single polymorphic check (`as_scrollable`).
//! Node lifetime is owned by the host's tree; adapters hold `NodeHandle`
//! clones, never exclusive ownership.

use std::cell::RefCell;
use std::rc::Rc;

use recell_ui_graphics::{EdgeInsets, Rect, Size};
use recell_ui_layout::{Constraints, Measurable};
use smallvec::SmallVec;

use crate::Scrollable;

/// Shared handle to a node in the visual tree.
///
/// All tree access is single-threaded on the UI-owning thread, so plain
/// `Rc`/`RefCell` sharing is sufficient; there is no internal locking.
pub type NodeHandle = Rc<RefCell<dyn VisualNode>>;

/// Inline capacity for child lists. Most nodes have a handful of children,
/// so 4 avoids heap allocation in the common case.
pub type ChildVec = SmallVec<[NodeHandle; 4]>;

/// A node in the retained visual tree.
///
/// Every method that a given node kind does not support defaults to a
/// no-op rather than a failure: a leaf silently refuses children, a node
/// without the scrollable capability answers `None`. Callers treat those
/// outcomes as normal.
pub trait VisualNode: Measurable {
    /// The last-assigned layout rect. Zero until the node has been laid
    /// out at least once.
    fn bounds(&self) -> Rect;

    /// Assigns the layout rect.
    fn set_bounds(&mut self, bounds: Rect);

    /// Outer margin included when the node is measured by a container.
    fn margin(&self) -> EdgeInsets {
        EdgeInsets::default()
    }

    /// Ordered child nodes. Leaves return an empty slice.
    fn children(&self) -> &[NodeHandle] {
        &[]
    }

    /// Inserts `child` at `index` (clamped to the current child count).
    /// No-op on leaves.
    fn insert_child(&mut self, _index: usize, _child: NodeHandle) {}

    /// Removes the child identified by pointer identity. Returns whether
    /// anything was removed.
    fn remove_child(&mut self, _child: &NodeHandle) -> bool {
        false
    }

    /// Explicit width request that wins over the measured width when
    /// positive.
    fn width_override(&self) -> Option<f32> {
        None
    }

    /// Explicit height request that wins over the measured height when
    /// positive.
    fn height_override(&self) -> Option<f32> {
        None
    }

    /// Resolves the scrollable capability, if this node exposes it.
    fn as_scrollable(&self) -> Option<&dyn Scrollable> {
        None
    }

    fn as_scrollable_mut(&mut self) -> Option<&mut dyn Scrollable> {
        None
    }
}

/// Removes `child` from `children` by pointer identity.
pub(crate) fn remove_by_identity(children: &mut ChildVec, child: &NodeHandle) -> bool {
    if let Some(position) = children.iter().position(|c| Rc::ptr_eq(c, child)) {
        children.remove(position);
        true
    } else {
        false
    }
}

/// Measures `children` and returns the componentwise maximum of their
/// margin-inclusive natural sizes, clamped into `constraints`.
pub(crate) fn measure_children_max(children: &[NodeHandle], constraints: Constraints) -> Size {
    let mut width = 0.0f32;
    let mut height = 0.0f32;
    for child in children {
        let child = child.borrow();
        let margin = child.margin();
        let inner = child.measure(
            constraints
                .loosen()
                .deflate(margin.horizontal_sum(), margin.vertical_sum()),
        );
        width = width.max(inner.width + margin.horizontal_sum());
        height = height.max(inner.height + margin.vertical_sum());
    }
    let (width, height) = constraints.constrain(width, height);
    Size::new(width, height)
}

/// Plain container node: holds ordered children and measures to the
/// componentwise maximum of their natural sizes.
#[derive(Default)]
pub struct PanelNode {
    children: ChildVec,
    bounds: Rect,
}

impl PanelNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the node in a shared tree handle.
    pub fn into_handle(self) -> NodeHandle {
        Rc::new(RefCell::new(self))
    }

    /// Appends a child at the end.
    pub fn push_child(&mut self, child: NodeHandle) {
        self.children.push(child);
    }
}

impl Measurable for PanelNode {
    fn measure(&self, constraints: Constraints) -> Size {
        measure_children_max(&self.children, constraints)
    }
}

impl VisualNode for PanelNode {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    fn insert_child(&mut self, index: usize, child: NodeHandle) {
        if index > self.children.len() {
            log::debug!(
                "child index {} beyond end ({}), appending",
                index,
                self.children.len()
            );
        }
        let index = index.min(self.children.len());
        self.children.insert(index, child);
    }

    fn remove_child(&mut self, child: &NodeHandle) -> bool {
        remove_by_identity(&mut self.children, child)
    }
}

/// Leaf node hosting app content with a settable preferred size.
///
/// The preferred size stands in for whatever the hosted content would
/// naturally occupy; hosts update it when the content changes and the
/// surrounding cell re-runs its measurement decision.
#[derive(Default)]
pub struct ContentNode {
    preferred: Size,
    width_override: Option<f32>,
    height_override: Option<f32>,
    margin: EdgeInsets,
    bounds: Rect,
}

impl ContentNode {
    pub fn new(preferred: Size) -> Self {
        Self {
            preferred,
            ..Self::default()
        }
    }

    pub fn into_handle(self) -> NodeHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn preferred_size(&self) -> Size {
        self.preferred
    }

    /// Updates the natural size the content reports on the next measure.
    pub fn set_preferred_size(&mut self, preferred: Size) {
        self.preferred = preferred;
    }

    pub fn set_width_override(&mut self, width: Option<f32>) {
        self.width_override = width;
    }

    pub fn set_height_override(&mut self, height: Option<f32>) {
        self.height_override = height;
    }

    pub fn set_margin(&mut self, margin: EdgeInsets) {
        self.margin = margin;
    }
}

impl Measurable for ContentNode {
    fn measure(&self, constraints: Constraints) -> Size {
        let (width, height) = constraints.constrain(self.preferred.width, self.preferred.height);
        Size::new(width, height)
    }
}

impl VisualNode for ContentNode {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn margin(&self) -> EdgeInsets {
        self.margin
    }

    fn width_override(&self) -> Option<f32> {
        self.width_override
    }

    fn height_override(&self) -> Option<f32> {
        self.height_override
    }
}
