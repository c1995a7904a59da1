//! The reattach history: a bounded MRU list plus persistence orchestration.

use crate::core::repository::{HISTORY_CAPACITY, TargetRepository};
use crate::core::target::Target;
use crate::core::target_list::TargetList;

/// Session-scoped history of attach targets.
///
/// Owns its [`TargetList`] and mediates all storage through the injected
/// repository. Every failure is converted to a boolean at this boundary:
/// a failed load leaves an empty usable list, a failed save leaves the
/// in-memory state untouched, and nothing ever panics or propagates.
///
/// Single-threaded by design; one instance belongs to one host session.
pub struct History<R: TargetRepository> {
    repository: R,
    items: TargetList,
}

impl<R: TargetRepository> History<R> {
    pub fn new(repository: R) -> Self {
        History {
            repository,
            items: TargetList::new(HISTORY_CAPACITY),
        }
    }

    /// Current items, most recent first. Read access for host UI display.
    pub fn items(&self) -> &TargetList {
        &self.items
    }

    /// Record a target as most recently used. See [`TargetList::add_first`]
    /// for the dedup/promote/evict semantics.
    pub fn add_first(&mut self, target: Target) {
        self.items.add_first(target);
    }

    /// Replace the items from storage. Returns `false` when the store had
    /// no data or could not be opened; the list is then reset to a fresh
    /// empty one, still fully usable. Malformed stored entries were already
    /// skipped inside the repository, so partially corrupt data still loads
    /// `true` with the valid entries in order.
    pub fn load(&mut self) -> bool {
        match self.repository.load_targets() {
            Some(targets) => {
                self.items = targets;
                true
            }
            None => {
                self.items = TargetList::new(HISTORY_CAPACITY);
                false
            }
        }
    }

    /// Persist the current items. Pure read of in-memory state; reports
    /// whatever the repository reports and never mutates `items`.
    pub fn save(&self) -> bool {
        self.repository.save_targets(&self.items)
    }
}
