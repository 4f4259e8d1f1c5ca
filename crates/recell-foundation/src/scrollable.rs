//! Scrollable capability and the concrete scroll container.
//!
//! Scrollability is a capability some visual nodes expose, resolved with a
//! single `as_scrollable()` check instead of testing concrete node types.
//! Tree walks that look for "the nearest scrollable thing" stop at the
//! first node that answers.

use std::cell::RefCell;
use std::rc::Rc;

use recell_ui_graphics::{Point, Rect, Size};
use recell_ui_layout::{Constraints, Measurable};

use crate::node::{measure_children_max, remove_by_identity, ChildVec, NodeHandle, VisualNode};

/// Capability exposed by nodes whose content can be offset.
///
/// Offsets are not clamped here: a negative `y` means the content is in an
/// overscroll (rubber-band) state driven by the user, and callers are
/// expected to observe that rather than fight it.
pub trait Scrollable {
    /// Current content offset.
    fn content_offset(&self) -> Point;

    /// Sets the content offset. `animated` is forwarded to the host's
    /// presentation layer; this layer only records it.
    fn set_content_offset(&mut self, offset: Point, animated: bool);

    /// The companion-control slot, for platforms that attach an indicator
    /// directly to the scrollable instead of inserting it as a child.
    fn indicator_slot(&self) -> Option<&NodeHandle>;

    fn set_indicator_slot(&mut self, indicator: Option<NodeHandle>);
}

/// Concrete scrollable container node.
#[derive(Default)]
pub struct ScrollContainer {
    children: ChildVec,
    bounds: Rect,
    offset: Point,
    last_change_animated: bool,
    indicator: Option<NodeHandle>,
}

impl ScrollContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_handle(self) -> NodeHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn push_child(&mut self, child: NodeHandle) {
        self.children.push(child);
    }

    /// Whether the most recent offset change asked for animation.
    pub fn last_offset_change_animated(&self) -> bool {
        self.last_change_animated
    }
}

impl Measurable for ScrollContainer {
    fn measure(&self, constraints: Constraints) -> Size {
        measure_children_max(&self.children, constraints)
    }
}

impl VisualNode for ScrollContainer {
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

    fn as_scrollable(&self) -> Option<&dyn Scrollable> {
        Some(self)
    }

    fn as_scrollable_mut(&mut self) -> Option<&mut dyn Scrollable> {
        Some(self)
    }
}

impl Scrollable for ScrollContainer {
    fn content_offset(&self) -> Point {
        self.offset
    }

    fn set_content_offset(&mut self, offset: Point, animated: bool) {
        self.offset = offset;
        self.last_change_animated = animated;
    }

    fn indicator_slot(&self) -> Option<&NodeHandle> {
        self.indicator.as_ref()
    }

    fn set_indicator_slot(&mut self, indicator: Option<NodeHandle>) {
        self.indicator = indicator;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ContentNode;

    #[test]
    fn test_capability_resolves_through_node_trait() {
        let container = ScrollContainer::new().into_handle();
        assert!(container.borrow().as_scrollable().is_some());

        let leaf = ContentNode::new(Size::ZERO).into_handle();
        assert!(leaf.borrow().as_scrollable().is_none());
    }

    #[test]
    fn test_offset_may_go_negative() {
        let mut container = ScrollContainer::new();
        container.set_content_offset(Point::new(0.0, -42.0), true);
        assert_eq!(container.content_offset().y, -42.0);
        assert!(container.last_offset_change_animated());
    }

    #[test]
    fn test_indicator_slot_roundtrip() {
        let mut container = ScrollContainer::new();
        let indicator = ContentNode::new(Size::new(0.0, 60.0)).into_handle();
        container.set_indicator_slot(Some(indicator.clone()));
        assert!(container
            .indicator_slot()
            .is_some_and(|slot| Rc::ptr_eq(slot, &indicator)));

        container.set_indicator_slot(None);
        assert!(container.indicator_slot().is_none());
    }
}
