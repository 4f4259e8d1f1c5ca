//! End-to-end tests for refresh indicator attachment and offsetting.
//!
//! These build small trees out of the concrete foundation nodes and drive
//! the renderer through the same property notifications a host would send.

use std::cell::RefCell;
use std::rc::Rc;

use recell_foundation::{ContentNode, NodeHandle, PanelNode, ScrollContainer, Scrollable, VisualNode};
use recell_ui::{RefreshConfig, RefreshProperty, RefreshRenderer};
use recell_ui_graphics::{Point, Size};

fn leaf() -> NodeHandle {
    ContentNode::new(Size::new(10.0, 10.0)).into_handle()
}

/// root -> [leaf, mid -> [scroll -> [content]]]; returns the root handle
/// and typed access to the scroll container.
fn nested_tree() -> (NodeHandle, Rc<RefCell<ScrollContainer>>) {
    let scroll_typed = Rc::new(RefCell::new(ScrollContainer::new()));
    scroll_typed.borrow_mut().push_child(leaf());
    let scroll: NodeHandle = scroll_typed.clone();

    let mut mid = PanelNode::new();
    mid.push_child(scroll);

    let mut root = PanelNode::new();
    root.push_child(leaf());
    root.push_child(mid.into_handle());

    (root.into_handle(), scroll_typed)
}

#[test]
fn attach_inserts_companion_into_nested_scrollable() {
    let (root, scroll) = nested_tree();
    let mut renderer = RefreshRenderer::new(root.clone(), RefreshConfig::default());

    renderer.on_property_changed(RefreshProperty::Enabled(true));

    assert!(renderer.is_attached());
    // The scroll container was child 0 of its parent, so the indicator
    // lands at index 0 of the scroll container, not anywhere on the root.
    let scroll = scroll.borrow();
    assert_eq!(scroll.children().len(), 2);
    assert!(Rc::ptr_eq(&scroll.children()[0], &renderer.indicator_handle()));
    assert_eq!(root.borrow().children().len(), 2);
}

#[test]
fn attach_forwards_child_index_as_insertion_index() {
    // scroll is child 1 of the root, so the indicator is inserted at
    // index 1 of the scroll container.
    let scroll_typed = Rc::new(RefCell::new(ScrollContainer::new()));
    scroll_typed.borrow_mut().push_child(leaf());
    scroll_typed.borrow_mut().push_child(leaf());
    let mut root = PanelNode::new();
    root.push_child(leaf());
    root.push_child(scroll_typed.clone());

    let mut renderer = RefreshRenderer::new(root.into_handle(), RefreshConfig::default());
    renderer.set_enabled(true);

    let scroll = scroll_typed.borrow();
    assert_eq!(scroll.children().len(), 3);
    assert!(Rc::ptr_eq(&scroll.children()[1], &renderer.indicator_handle()));
}

#[test]
fn attach_reaches_deep_scrollable() {
    let scroll_typed = Rc::new(RefCell::new(ScrollContainer::new()));
    let mut tree: NodeHandle = scroll_typed.clone();
    for _ in 0..6 {
        let mut wrapper = PanelNode::new();
        wrapper.push_child(tree);
        tree = wrapper.into_handle();
    }

    let mut renderer = RefreshRenderer::new(tree, RefreshConfig::default());
    renderer.set_enabled(true);

    assert!(renderer.is_attached());
    assert_eq!(scroll_typed.borrow().children().len(), 1);
}

#[test]
fn attach_without_capability_is_a_no_op() {
    let mut mid = PanelNode::new();
    mid.push_child(leaf());
    let mut root = PanelNode::new();
    root.push_child(mid.into_handle());
    root.push_child(leaf());
    let root = root.into_handle();

    let mut renderer = RefreshRenderer::new(root.clone(), RefreshConfig::default());
    renderer.set_enabled(true);

    assert!(!renderer.is_attached());
    let root = root.borrow();
    assert_eq!(root.children().len(), 2);
    assert!(root.children()[0].borrow().children().len() == 1);
}

#[test]
fn direct_attachment_uses_scrollable_slot() {
    let (root, scroll) = nested_tree();
    let config = RefreshConfig {
        supports_direct_attachment: true,
    };
    let mut renderer = RefreshRenderer::new(root, config);

    renderer.set_enabled(true);

    let scroll = scroll.borrow();
    // Slot attachment leaves the child list alone.
    assert_eq!(scroll.children().len(), 1);
    assert!(scroll
        .indicator_slot()
        .is_some_and(|slot| Rc::ptr_eq(slot, &renderer.indicator_handle())));
}

#[test]
fn refreshing_offsets_content_from_attach_baseline() {
    let (root, scroll) = nested_tree();
    scroll
        .borrow_mut()
        .set_content_offset(Point::new(0.0, 100.0), false);

    let mut renderer = RefreshRenderer::new(root, RefreshConfig::default());
    renderer.set_enabled(true);

    renderer.set_refreshing(true);
    assert!(renderer.is_refreshing());
    // Baseline 100 minus the indicator's default frame height.
    assert_eq!(scroll.borrow().content_offset(), Point::new(0.0, 40.0));
    assert!(scroll.borrow().last_offset_change_animated());

    renderer.set_refreshing(false);
    assert_eq!(scroll.borrow().content_offset(), Point::new(0.0, 100.0));
}

#[test]
fn overscrolled_content_is_never_touched() {
    let (root, scroll) = nested_tree();
    scroll
        .borrow_mut()
        .set_content_offset(Point::new(0.0, -10.0), false);

    let mut renderer = RefreshRenderer::new(root, RefreshConfig::default());
    renderer.set_enabled(true);

    renderer.set_refreshing(true);
    assert_eq!(scroll.borrow().content_offset(), Point::new(0.0, -10.0));

    renderer.set_refreshing(false);
    assert_eq!(scroll.borrow().content_offset(), Point::new(0.0, -10.0));
}

#[test]
fn repeated_enable_notifications_keep_one_indicator() {
    let (root, scroll) = nested_tree();
    let mut renderer = RefreshRenderer::new(root, RefreshConfig::default());

    renderer.on_property_changed(RefreshProperty::Enabled(true));
    renderer.on_property_changed(RefreshProperty::Enabled(true));
    assert_eq!(scroll.borrow().children().len(), 2);

    renderer.on_property_changed(RefreshProperty::Enabled(false));
    renderer.on_property_changed(RefreshProperty::Enabled(false));
    assert_eq!(scroll.borrow().children().len(), 1);
    assert!(!renderer.is_attached());
}

#[test]
fn reenable_attaches_again_after_disable() {
    let (root, scroll) = nested_tree();
    let mut renderer = RefreshRenderer::new(root, RefreshConfig::default());

    renderer.set_enabled(true);
    renderer.set_enabled(false);
    renderer.set_enabled(true);

    assert!(renderer.is_attached());
    assert_eq!(scroll.borrow().children().len(), 2);
}

#[test]
fn dispose_detaches_exactly_once() {
    let (root, scroll) = nested_tree();
    let mut renderer = RefreshRenderer::new(root, RefreshConfig::default());
    renderer.set_enabled(true);
    assert_eq!(scroll.borrow().children().len(), 2);

    renderer.dispose();
    assert_eq!(scroll.borrow().children().len(), 1);
    assert!(!renderer.is_attached());

    renderer.dispose();
    renderer.set_enabled(true);
    assert_eq!(scroll.borrow().children().len(), 1);
}

#[test]
fn offset_search_reports_false_on_capability_free_tree() {
    let root = PanelNode::new().into_handle();
    let renderer = RefreshRenderer::new(root.clone(), RefreshConfig::default());
    assert!(!renderer.try_offset(&root, true));
}
