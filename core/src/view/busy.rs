//! Per-row busy flags for list and detail actions.

use std::collections::HashSet;

/// The kind of mutation in flight on one tutorial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BusyKind {
    Deleting,
    Toggling,
}

/// In-flight mutations keyed by tutorial id.
///
/// A row may be deleting and toggling at the same time, but never runs two
/// operations of the same kind.
#[derive(Debug, Default, Clone)]
pub struct BusyFlags {
    active: HashSet<(i64, BusyKind)>,
}

impl BusyFlags {
    /// Mark `id` busy with `kind`. Returns `false` if it already was.
    pub fn begin(&mut self, id: i64, kind: BusyKind) -> bool {
        self.active.insert((id, kind))
    }

    pub fn end(&mut self, id: i64, kind: BusyKind) {
        self.active.remove(&(id, kind));
    }

    pub fn is_busy(&self, id: i64, kind: BusyKind) -> bool {
        self.active.contains(&(id, kind))
    }

    pub fn is_row_busy(&self, id: i64) -> bool {
        self.active.iter().any(|(row, _)| *row == id)
    }

    pub fn kinds(&self, id: i64) -> Vec<BusyKind> {
        let mut kinds: Vec<BusyKind> = self
            .active
            .iter()
            .filter(|(row, _)| *row == id)
            .map(|(_, kind)| *kind)
            .collect();
        kinds.sort();
        kinds
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
