//! Persistence store contract and the in-memory backend.
//!
//! A store exposes named groups of string slots; the repository layer never
//! sees anything richer than get/set/delete on one group. Closing a group
//! handle is RAII: dropping the boxed [`StoreGroup`] closes it on every exit
//! path, including early returns after a failed slot operation.

use crate::core::error::ReattachError;
use rustc_hash::FxHashMap;
use std::cell::RefCell;

/// One open group of string slots.
pub trait StoreGroup {
    /// Absent also covers read errors on the slot; the caller treats both
    /// the same way.
    fn get_value(&self, key: &str) -> Option<String>;
    fn set_value(&mut self, key: &str, value: &str) -> Result<(), ReattachError>;
    /// Deleting a slot that does not exist is not an error.
    fn delete_value(&mut self, key: &str) -> Result<(), ReattachError>;
}

/// A key/value store holding named slot groups.
pub trait SlotStore {
    /// `None` when the group does not exist (read), cannot be created
    /// (write), or opening errored out.
    fn open_group(&self, name: &str, writable: bool) -> Option<Box<dyn StoreGroup + '_>>;
}

// Lets a repository borrow a store that outlives it, e.g. two histories
// sharing one MemoryStore.
impl<S: SlotStore + ?Sized> SlotStore for &S {
    fn open_group(&self, name: &str, writable: bool) -> Option<Box<dyn StoreGroup + '_>> {
        (**self).open_group(name, writable)
    }
}

/// In-memory store: backs tests and hosts that want a session-only history.
///
/// Groups spring into existence on writable open, mirroring create-on-write
/// registry semantics; a read open of a group never written to yields `None`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    groups: RefCell<FxHashMap<String, FxHashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Write a raw slot value directly, bypassing the group handle. Lets
    /// tests seed malformed payloads the codec must tolerate.
    pub fn seed_value(&self, group: &str, key: &str, value: &str) {
        self.groups
            .borrow_mut()
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Raw slot read for assertions.
    pub fn raw_value(&self, group: &str, key: &str) -> Option<String> {
        self.groups.borrow().get(group)?.get(key).cloned()
    }
}

impl SlotStore for MemoryStore {
    fn open_group(&self, name: &str, writable: bool) -> Option<Box<dyn StoreGroup + '_>> {
        if writable {
            self.groups
                .borrow_mut()
                .entry(name.to_string())
                .or_default();
        } else if !self.groups.borrow().contains_key(name) {
            return None;
        }
        Some(Box::new(MemoryGroup {
            store: self,
            name: name.to_string(),
        }))
    }
}

struct MemoryGroup<'a> {
    store: &'a MemoryStore,
    name: String,
}

impl StoreGroup for MemoryGroup<'_> {
    fn get_value(&self, key: &str) -> Option<String> {
        self.store.groups.borrow().get(&self.name)?.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: &str) -> Result<(), ReattachError> {
        self.store
            .groups
            .borrow_mut()
            .entry(self.name.clone())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_value(&mut self, key: &str) -> Result<(), ReattachError> {
        if let Some(group) = self.store.groups.borrow_mut().get_mut(&self.name) {
            group.remove(key);
        }
        Ok(())
    }
}
