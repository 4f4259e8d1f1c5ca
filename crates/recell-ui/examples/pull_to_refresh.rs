//! Walks a refresh cycle against a small hand-built tree.

use std::cell::RefCell;
use std::rc::Rc;

use recell_foundation::{ContentNode, NodeHandle, PanelNode, ScrollContainer, Scrollable, VisualNode};
use recell_ui::{Command, RefreshConfig, RefreshRenderer};
use recell_ui_graphics::Size;

fn main() {
    // root -> panel -> scroll container with one content child.
    let scroll = Rc::new(RefCell::new(ScrollContainer::new()));
    scroll
        .borrow_mut()
        .push_child(ContentNode::new(Size::new(320.0, 900.0)).into_handle());

    let mut panel = PanelNode::new();
    let scroll_handle: NodeHandle = scroll.clone();
    panel.push_child(scroll_handle);
    let root = panel.into_handle();

    let mut renderer = RefreshRenderer::new(root, RefreshConfig::default());
    renderer.set_command(Some(Command::new(|| println!("refresh requested"))));

    renderer.set_enabled(true);
    println!(
        "attached: {}, scroll children: {}",
        renderer.is_attached(),
        scroll.borrow().children().len()
    );

    renderer.notify_pull();
    renderer.set_refreshing(true);
    println!(
        "refreshing, content offset: {:?}",
        scroll.borrow().content_offset()
    );

    renderer.set_refreshing(false);
    println!(
        "done, content offset: {:?}",
        scroll.borrow().content_offset()
    );

    renderer.dispose();
    println!("disposed, scroll children: {}", scroll.borrow().children().len());
}
