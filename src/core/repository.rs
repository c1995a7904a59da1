//! Slot codec and positional-slot repository.
//!
//! Persisted layout: one group ([`GROUP_KEY_NAME`]) holding up to
//! [`HISTORY_CAPACITY`] string slots named `<prefix>1` .. `<prefix>N`,
//! 1-based, slot 1 = most recent. Slots are addressed by index only, never
//! enumerated, so leftovers from a prior larger capacity are simply not
//! read.
//!
//! Each slot holds one compact JSON object:
//!
//! ```json
//! {"ProcessId":7024,"ProcessName":"test1.exe","ProcessPath":"test1.exe",
//!  "ProcessUser":"TEST1","ServerName":"","IsAttached":false,
//!  "IsLocal":true,"Engine":null}
//! ```
//!
//! `IsLocal` is derived and ignored on read. A slot that fails to parse is
//! one malformed entry: skipped silently, never fatal to the load.

use crate::core::store::SlotStore;
use crate::core::target::{EngineId, Target};
use crate::core::target_list::TargetList;
use serde::{Deserialize, Serialize};

/// Fixed history size, shared between writer and reader. Changing it needs
/// no migration: load never reads past the current capacity, and save
/// deletes every slot above the current item count.
pub const HISTORY_CAPACITY: usize = 10;

/// The single group this crate persists under.
pub const GROUP_KEY_NAME: &str = "ReAttach";

/// Prefix for positional slot keys (`HistoryItem1`, `HistoryItem2`, ...).
pub const SLOT_KEY_PREFIX: &str = "HistoryItem";

/// 1-based slot key for a history position.
pub fn slot_key(index: usize) -> String {
    format!("{}{}", SLOT_KEY_PREFIX, index)
}

/// Stored shape of one target. Field names are part of the persisted
/// format; optional fields default so a hand-edited or older record still
/// parses.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SlotRecord {
    process_id: i32,
    process_name: String,
    process_path: String,
    #[serde(default)]
    process_user: String,
    #[serde(default)]
    server_name: String,
    #[serde(default)]
    is_attached: bool,
    #[serde(default)]
    is_local: bool,
    #[serde(default)]
    engine: Option<EngineId>,
}

fn encode_slot(target: &Target) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SlotRecord {
        process_id: target.process_id,
        process_name: target.process_name.clone(),
        process_path: target.process_path.clone(),
        process_user: target.process_user.clone(),
        server_name: target.server_name.clone(),
        is_attached: target.is_attached,
        is_local: target.is_local(),
        engine: target.engine.clone(),
    })
}

/// Per-entry tolerant parse: a valid target or a discard signal.
fn decode_slot(raw: &str) -> Option<Target> {
    let record: SlotRecord = serde_json::from_str(raw).ok()?;
    Some(Target {
        process_id: record.process_id,
        process_name: record.process_name,
        process_path: record.process_path,
        process_user: record.process_user,
        server_name: record.server_name,
        is_attached: record.is_attached,
        engine: record.engine,
    })
}

/// Load/save contract the history depends on. Mocked directly in tests;
/// implemented for real storage by [`SlotRepository`].
pub trait TargetRepository {
    /// `None` means the store had no data or could not be opened. A list is
    /// returned otherwise, possibly empty, with malformed slots dropped.
    fn load_targets(&self) -> Option<TargetList>;
    /// False on any failed slot operation; remaining slots are still
    /// attempted and the group handle is still closed.
    fn save_targets(&self, targets: &TargetList) -> bool;
}

/// Positional-slot repository over any [`SlotStore`].
pub struct SlotRepository<S: SlotStore> {
    store: S,
}

impl<S: SlotStore> SlotRepository<S> {
    pub fn new(store: S) -> Self {
        SlotRepository { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: SlotStore> TargetRepository for SlotRepository<S> {
    fn load_targets(&self) -> Option<TargetList> {
        let group = self.store.open_group(GROUP_KEY_NAME, false)?;
        let mut targets = TargetList::new(HISTORY_CAPACITY);
        // Rebuild through add_first, highest slot first, so slot 1 lands at
        // index 0 and the list invariants hold even over corrupt data that
        // duplicated an entry across slots.
        for index in (1..=HISTORY_CAPACITY).rev() {
            if let Some(raw) = group.get_value(&slot_key(index)) {
                if let Some(target) = decode_slot(&raw) {
                    targets.add_first(target);
                }
            }
        }
        Some(targets)
    }

    fn save_targets(&self, targets: &TargetList) -> bool {
        let Some(mut group) = self.store.open_group(GROUP_KEY_NAME, true) else {
            return false;
        };
        let mut ok = true;
        for (position, target) in targets.iter().enumerate() {
            let written = encode_slot(target)
                .map_err(Into::into)
                .and_then(|raw| group.set_value(&slot_key(position + 1), &raw));
            if written.is_err() {
                ok = false;
            }
        }
        // Clear slots above the current item count so entries from a
        // previous larger save cannot resurrect on the next load.
        for index in targets.len() + 1..=HISTORY_CAPACITY {
            if group.delete_value(&slot_key(index)).is_err() {
                ok = false;
            }
        }
        ok
    }
}
