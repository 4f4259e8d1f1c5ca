//! Pull-to-refresh renderer.
//!
//! The renderer owns a refresh indicator and manages its place inside an
//! opaque visual tree: a depth-first, first-child-first walk finds the
//! nearest scrollable node, the indicator is attached there (directly via
//! the scrollable's slot when the platform permits, otherwise as a child),
//! and refresh activation offsets that node's content to reveal it. Every
//! walk stops at the first capable node, so at most one node is mutated
//! per call.

use std::cell::RefCell;
use std::rc::Rc;

use recell_foundation::{NodeHandle, Scrollable, VisualNode};
use recell_ui_graphics::{Color, Point, Rect, Size};
use recell_ui_layout::{Constraints, Measurable};

/// Frame height the indicator reports before the host has laid it out.
const DEFAULT_INDICATOR_HEIGHT: f32 = 60.0;

/// The companion control inserted into the scrollable's tree.
///
/// A leaf node: the host draws it, this layer only tracks its frame,
/// refresh state, and colors. Repeated `begin_refreshing` or
/// `end_refreshing` calls with no state change are no-ops.
pub struct RefreshIndicator {
    bounds: Rect,
    refreshing: bool,
    tint: Option<Color>,
    background: Option<Color>,
}

impl RefreshIndicator {
    pub fn new() -> Self {
        Self {
            bounds: Rect::from_size(Size::new(0.0, DEFAULT_INDICATOR_HEIGHT)),
            refreshing: false,
            tint: None,
            background: None,
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn begin_refreshing(&mut self) {
        self.refreshing = true;
    }

    pub fn end_refreshing(&mut self) {
        self.refreshing = false;
    }

    pub fn tint(&self) -> Option<Color> {
        self.tint
    }

    pub fn set_tint(&mut self, tint: Option<Color>) {
        self.tint = tint;
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background
    }

    pub fn set_background_color(&mut self, background: Option<Color>) {
        self.background = background;
    }
}

impl Default for RefreshIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Measurable for RefreshIndicator {
    fn measure(&self, constraints: Constraints) -> Size {
        let (width, height) = constraints.constrain(self.bounds.width, self.bounds.height);
        Size::new(width, height)
    }
}

impl VisualNode for RefreshIndicator {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}

/// Refresh action with an optional execution gate.
pub struct Command {
    action: Box<dyn Fn()>,
    can_execute: Option<Box<dyn Fn() -> bool>>,
}

impl Command {
    pub fn new(action: impl Fn() + 'static) -> Self {
        Self {
            action: Box::new(action),
            can_execute: None,
        }
    }

    pub fn with_can_execute(mut self, gate: impl Fn() -> bool + 'static) -> Self {
        self.can_execute = Some(Box::new(gate));
        self
    }

    pub fn can_execute(&self) -> bool {
        self.can_execute.as_ref().map_or(true, |gate| gate())
    }

    pub fn execute(&self) {
        (self.action)()
    }
}

/// Platform capabilities supplied by the host.
///
/// Whether the indicator may be attached through the scrollable's slot is
/// a property of the host platform (and its window chrome); the host
/// resolves it and hands the answer in here. This crate never probes
/// platform versions itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshConfig {
    pub supports_direct_attachment: bool,
}

/// Observed properties the host notifies the renderer about.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RefreshProperty {
    Enabled(bool),
    Refreshing(bool),
    IndicatorColor(Option<Color>),
    BackgroundColor(Option<Color>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AttachMode {
    Slot,
    Child,
}

struct AttachPoint {
    node: NodeHandle,
    mode: AttachMode,
}

/// Renderer that manages a [`RefreshIndicator`] within a visual tree.
///
/// Attachment and detachment are paired: however the renderer is torn
/// down (disable or [`dispose`](Self::dispose)), an attached indicator is
/// removed from the tree exactly once.
pub struct RefreshRenderer {
    root: NodeHandle,
    config: RefreshConfig,
    indicator: Rc<RefCell<RefreshIndicator>>,
    /// The indicator erased to a tree handle, created once so pointer
    /// identity stays stable across insert and remove.
    indicator_node: NodeHandle,
    /// Where attachment searches start. Narrowed to the matched node on a
    /// successful attach so later re-enables skip the already-searched
    /// upper tree.
    search_origin: NodeHandle,
    attach_point: Option<AttachPoint>,
    baseline_y: f32,
    indicator_height: f32,
    refreshing: bool,
    disposed: bool,
    command: Option<Command>,
}

impl RefreshRenderer {
    /// Creates a renderer over `root`, the subtree the host renders the
    /// refresh view into.
    pub fn new(root: NodeHandle, config: RefreshConfig) -> Self {
        let indicator = Rc::new(RefCell::new(RefreshIndicator::new()));
        let indicator_node: NodeHandle = indicator.clone();
        Self {
            search_origin: root.clone(),
            root,
            config,
            indicator,
            indicator_node,
            attach_point: None,
            baseline_y: 0.0,
            indicator_height: 0.0,
            refreshing: false,
            disposed: false,
            command: None,
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_attached(&self) -> bool {
        self.attach_point.is_some()
    }

    /// Shared handle to the indicator node.
    pub fn indicator_handle(&self) -> NodeHandle {
        self.indicator_node.clone()
    }

    pub fn set_command(&mut self, command: Option<Command>) {
        self.command = command;
    }

    /// Host property-change notification entry point. Safe to call
    /// repeatedly with the same value.
    pub fn on_property_changed(&mut self, property: RefreshProperty) {
        match property {
            RefreshProperty::Enabled(enabled) => self.set_enabled(enabled),
            RefreshProperty::Refreshing(refreshing) => self.set_refreshing(refreshing),
            RefreshProperty::IndicatorColor(color) => self.set_indicator_color(color),
            RefreshProperty::BackgroundColor(color) => self.set_background_color(color),
        }
    }

    /// Enabling attaches the indicator to the nearest scrollable node;
    /// disabling removes it. A tree with no scrollable member is a normal
    /// outcome: the indicator stays detached and the call is a no-op.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.disposed {
            return;
        }
        if enabled {
            if self.attach_point.is_some() {
                return;
            }
            let origin = self.search_origin.clone();
            if !self.try_attach(&origin, 0) {
                log::debug!("refresh: no scrollable node in tree, indicator left detached");
            }
        } else {
            self.detach();
        }
    }

    /// Starts or ends refreshing: flips the indicator and offsets the
    /// nearest scrollable's content to reveal or hide it.
    pub fn set_refreshing(&mut self, refreshing: bool) {
        if self.disposed {
            return;
        }
        self.refreshing = refreshing;
        {
            let mut indicator = self.indicator.borrow_mut();
            if refreshing {
                indicator.begin_refreshing();
            } else {
                indicator.end_refreshing();
            }
        }
        let root = self.root.clone();
        self.try_offset(&root, refreshing);
    }

    pub fn set_indicator_color(&mut self, color: Option<Color>) {
        self.indicator.borrow_mut().set_tint(color);
    }

    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.indicator.borrow_mut().set_background_color(color);
    }

    /// Invoked by the host when the user pull gesture fires. Runs the
    /// command if its gate allows.
    pub fn notify_pull(&self) {
        if let Some(command) = &self.command {
            if command.can_execute() {
                command.execute();
            }
        }
    }

    /// Tears the renderer down. Idempotent: whichever exit path gets here
    /// first detaches the indicator and drops the command.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.detach();
        self.command = None;
        self.disposed = true;
    }

    /// Attaches the indicator to the first scrollable node in `node`'s
    /// subtree (depth-first, pre-order, children in index order).
    ///
    /// On the capable node: when the platform supports it the indicator
    /// goes into the scrollable's slot, otherwise it is inserted as a
    /// child at `index`. The node's current `content_offset().y` and the
    /// indicator's frame height are recorded as the baseline for later
    /// offsetting. Returns `false` if the subtree has no scrollable node,
    /// leaving the tree untouched.
    ///
    /// Recursion depth is not bounded here; callers are expected to bound
    /// tree depth externally.
    pub fn try_attach(&mut self, node: &NodeHandle, index: usize) -> bool {
        if node.borrow().as_scrollable().is_some() {
            let mode = {
                let mut target = node.borrow_mut();
                self.baseline_y = target
                    .as_scrollable()
                    .map(|scrollable| scrollable.content_offset().y)
                    .unwrap_or_default();
                if self.config.supports_direct_attachment {
                    if let Some(scrollable) = target.as_scrollable_mut() {
                        scrollable.set_indicator_slot(Some(self.indicator_node.clone()));
                    }
                    AttachMode::Slot
                } else {
                    target.insert_child(index, self.indicator_node.clone());
                    AttachMode::Child
                }
            };
            self.indicator_height = self.indicator.borrow().bounds().height;
            self.attach_point = Some(AttachPoint {
                node: node.clone(),
                mode,
            });
            self.search_origin = node.clone();
            log::debug!(
                "refresh: indicator attached ({:?}, baseline_y={}, height={})",
                mode,
                self.baseline_y,
                self.indicator_height
            );
            return true;
        }

        let children: Vec<NodeHandle> = node.borrow().children().to_vec();
        if children.is_empty() {
            return false;
        }
        for (child_index, child) in children.iter().enumerate() {
            if self.try_attach(child, child_index) {
                return true;
            }
        }
        false
    }

    /// Offsets the first scrollable node in `node`'s subtree to reveal
    /// (`activating`) or hide the indicator.
    ///
    /// A scrollable already in an overscroll state (`content_offset().y <
    /// 0`) is left alone: the offset belongs to the user's gesture at that
    /// point. Returns `false` if the subtree has no scrollable node.
    pub fn try_offset(&self, node: &NodeHandle, activating: bool) -> bool {
        {
            let mut target = node.borrow_mut();
            if let Some(scrollable) = target.as_scrollable_mut() {
                if scrollable.content_offset().y < 0.0 {
                    return true;
                }
                let y = if activating {
                    self.baseline_y - self.indicator_height
                } else {
                    self.baseline_y
                };
                scrollable.set_content_offset(Point::new(0.0, y), true);
                return true;
            }
        }

        let children: Vec<NodeHandle> = node.borrow().children().to_vec();
        children
            .iter()
            .any(|child| self.try_offset(child, activating))
    }

    fn detach(&mut self) {
        let Some(attach) = self.attach_point.take() else {
            return;
        };
        let mut node = attach.node.borrow_mut();
        match attach.mode {
            AttachMode::Slot => {
                if let Some(scrollable) = node.as_scrollable_mut() {
                    scrollable.set_indicator_slot(None);
                }
            }
            AttachMode::Child => {
                node.remove_child(&self.indicator_node);
            }
        }
        log::debug!("refresh: indicator detached");
    }
}
