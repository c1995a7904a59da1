//! Bounded, deduplicating MRU sequence of targets.

use crate::core::target::Target;

/// Ordered most-recent-first list of [`Target`]s with a fixed capacity.
///
/// Invariants, held after every operation:
/// 1. `len() <= capacity()`.
/// 2. No two entries are equal under target identity.
/// 3. Index 0 is the most recently added/promoted entry.
#[derive(Debug, Clone)]
pub struct TargetList {
    capacity: usize,
    items: Vec<Target>,
}

impl TargetList {
    pub fn new(capacity: usize) -> Self {
        TargetList {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Insert at the front. An existing entry equal to `target` is removed
    /// first, so the incoming target (fresher pid, attached state, engine)
    /// replaces the stale one rather than duplicating it. The tail is
    /// dropped when the list would exceed capacity.
    pub fn add_first(&mut self, target: Target) {
        self.items.retain(|existing| *existing != target);
        self.items.insert(0, target);
        self.items.truncate(self.capacity);
    }

    pub fn get(&self, index: usize) -> Option<&Target> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
