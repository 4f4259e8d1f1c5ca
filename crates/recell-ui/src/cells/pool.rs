//! Cell reuse pool.
//!
//! Cells are recycled across logical items instead of being rebuilt per
//! item. A reuse identifier keys cells by their layout variant so a
//! recycled cell is always structurally compatible with the slot asking
//! for it.

use recell_ui_layout::Axis;
use rustc_hash::FxHashMap;

use super::{CellRole, TemplatedCell};

/// Identifies a cell variant for reuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReuseId {
    pub orientation: Axis,
    pub role: CellRole,
}

impl ReuseId {
    pub fn new(orientation: Axis, role: CellRole) -> Self {
        Self { orientation, role }
    }
}

/// Pool of recycled cells, bucketed by reuse identifier.
#[derive(Default)]
pub struct CellPool {
    free: FxHashMap<ReuseId, Vec<TemplatedCell>>,
}

impl CellPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a recycled cell for `id`, or a fresh one if the bucket is
    /// empty.
    pub fn dequeue(&mut self, id: ReuseId) -> TemplatedCell {
        self.free
            .get_mut(&id)
            .and_then(Vec::pop)
            .unwrap_or_else(|| TemplatedCell::new(id.orientation, id.role))
    }

    /// Resets `cell` and returns it to its bucket.
    pub fn recycle(&mut self, mut cell: TemplatedCell) {
        cell.prepare_for_reuse();
        let id = ReuseId::new(cell.orientation(), cell.role());
        self.free.entry(id).or_default().push(cell);
    }

    /// Number of idle cells currently pooled for `id`.
    pub fn free_count(&self, id: ReuseId) -> usize {
        self.free.get(&id).map_or(0, Vec::len)
    }
}
