//! End-to-end tests for cell measurement and the resize decision.

use std::cell::RefCell;
use std::rc::Rc;

use recell_foundation::{ContentNode, NodeHandle};
use recell_ui::{CellPool, CellRole, ReuseId, TemplatedCell};
use recell_ui_graphics::Size;
use recell_ui_layout::Axis;

#[test]
fn horizontal_row_measure_and_resize_cycle() {
    // A 44pt-high horizontal row hosting content that is naturally 120pt
    // wide at that height.
    let content = Rc::new(RefCell::new(ContentNode::new(Size::new(120.0, 44.0))));
    let handle: NodeHandle = content.clone();

    let mut cell = TemplatedCell::new(Axis::Horizontal, CellRole::Item);
    cell.bind(handle);
    cell.constrain_to(Size::new(375.0, 44.0));

    let reported = cell.measure();
    assert_eq!(reported, Size::new(120.0, 44.0));

    // Steady state: the layout already granted the natural size.
    assert_eq!(cell.content_size_update(reported), None);

    // The content grows; the next layout pass must resize the cell.
    content
        .borrow_mut()
        .set_preferred_size(Size::new(150.0, 44.0));
    let desired = cell.content_size_update(reported);
    assert_eq!(desired, Some(Size::new(150.0, 44.0)));

    // The host resizes the slot and lays out again; the decision settles.
    let desired = desired.unwrap();
    cell.constrain_to(desired);
    assert_eq!(cell.measure(), Size::new(150.0, 44.0));
    assert_eq!(cell.content_size_update(Size::new(150.0, 44.0)), None);
}

#[test]
fn vertical_column_measure_and_resize_cycle() {
    let content = Rc::new(RefCell::new(ContentNode::new(Size::new(320.0, 90.0))));
    let handle: NodeHandle = content.clone();

    let mut cell = TemplatedCell::new(Axis::Vertical, CellRole::Item);
    cell.bind(handle);
    cell.constrain_to(Size::new(320.0, 90.0));

    assert_eq!(cell.measure(), Size::new(320.0, 90.0));
    assert_eq!(cell.content_size_update(Size::new(320.0, 90.0)), None);

    content
        .borrow_mut()
        .set_preferred_size(Size::new(320.0, 140.0));
    assert_eq!(
        cell.content_size_update(Size::new(320.0, 90.0)),
        Some(Size::new(320.0, 140.0))
    );
}

#[test]
fn pooled_cell_serves_successive_items() {
    let id = ReuseId::new(Axis::Vertical, CellRole::Item);
    let mut pool = CellPool::new();

    let mut cell = pool.dequeue(id);
    cell.bind(ContentNode::new(Size::new(320.0, 60.0)).into_handle());
    cell.constrain_to(Size::new(320.0, 600.0));
    assert_eq!(cell.measure(), Size::new(320.0, 60.0));
    pool.recycle(cell);

    // The recycled cell comes back reset and serves a different item.
    let mut cell = pool.dequeue(id);
    assert!(cell.content().is_none());
    cell.bind(ContentNode::new(Size::new(320.0, 200.0)).into_handle());
    cell.constrain_to(Size::new(320.0, 600.0));
    assert_eq!(cell.measure(), Size::new(320.0, 200.0));
    assert_eq!(pool.free_count(id), 0);
}
