//! Snapshot handles retained per recorded action.

use crate::reader::SnapshotHandle;
use indexmap::IndexMap;
use retrace_core::ActionId;

/// Maps action ids to the snapshot that produced them
///
/// With a bound set, inserting past the bound evicts the oldest handle. The
/// log itself is never trimmed by the registry.
#[derive(Clone, Default)]
pub struct SnapshotRegistry {
    handles: IndexMap<ActionId, SnapshotHandle>,
    max: Option<usize>,
}

impl SnapshotRegistry {
    /// Create an unbounded registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding at most `max` handles
    #[must_use]
    pub fn bounded(max: Option<usize>) -> Self {
        Self {
            handles: IndexMap::new(),
            max,
        }
    }

    /// Retain `handle` for `id`, returning any evicted ids
    pub fn insert(&mut self, id: ActionId, handle: SnapshotHandle) -> Vec<ActionId> {
        self.handles.insert(id, handle);
        let mut evicted = Vec::new();
        if let Some(max) = self.max {
            while self.handles.len() > max {
                match self.handles.shift_remove_index(0) {
                    Some((old, _)) => evicted.push(old),
                    None => break,
                }
            }
        }
        evicted
    }

    /// Drop handles for ids that left the log
    pub fn release(&mut self, ids: &[ActionId]) {
        for id in ids {
            self.handles.shift_remove(id);
        }
    }

    /// Drop every handle
    pub fn clear(&mut self) {
        self.handles.clear();
    }

    /// Snapshot recorded for `id`, if still retained
    #[must_use]
    pub fn get(&self, id: ActionId) -> Option<&SnapshotHandle> {
        self.handles.get(&id)
    }

    /// Whether a handle for `id` is retained
    #[must_use]
    pub fn contains(&self, id: ActionId) -> bool {
        self.handles.contains_key(&id)
    }

    /// Retained handle count
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True if nothing is retained
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl std::fmt::Debug for SnapshotRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotRegistry")
            .field("ids", &self.handles.keys().collect::<Vec<_>>())
            .field("max", &self.max)
            .finish()
    }
}
