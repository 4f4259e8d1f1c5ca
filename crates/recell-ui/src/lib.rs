//! Cell adapters and refresh control for Recell
//!
//! Two cooperating pieces live here:
//!
//! - [`cells`]: fixed-capacity, pooled cells that host a visual node and
//!   decide on each layout pass whether the node's natural size has
//!   drifted enough to require a resize.
//! - [`refresh`]: a renderer that locates the nearest scrollable node in
//!   an opaque tree and manages a pull-to-refresh indicator inside it.

pub mod cells;
pub mod refresh;

pub use cells::{CellPool, CellRole, ReuseId, TemplatedCell};
pub use refresh::{Command, RefreshConfig, RefreshIndicator, RefreshProperty, RefreshRenderer};
