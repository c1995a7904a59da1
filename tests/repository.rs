use reattach_history::core::error::ReattachError;
use reattach_history::core::repository::{
    GROUP_KEY_NAME, HISTORY_CAPACITY, SlotRepository, TargetRepository, slot_key,
};
use reattach_history::core::store::{MemoryStore, SlotStore, StoreGroup};
use reattach_history::core::target::{EngineId, Target};
use reattach_history::core::target_list::TargetList;
use std::cell::Cell;
use std::rc::Rc;

const VALID_SLOT: &str = concat!(
    "{\"ProcessId\":7024,\"ProcessName\":\"test1.exe\",",
    "\"ProcessPath\":\"test1.exe\",\"ProcessUser\":\"TEST1\",",
    "\"ServerName\":\"\",\"IsAttached\":false,\"IsLocal\":true,\"Engine\":null}"
);

fn list_of(targets: Vec<Target>) -> TargetList {
    let mut list = TargetList::new(HISTORY_CAPACITY);
    for target in targets.into_iter().rev() {
        list.add_first(target);
    }
    list
}

#[test]
fn test_load_from_missing_group_is_absent() {
    let store = MemoryStore::new();
    let repository = SlotRepository::new(store);
    assert!(repository.load_targets().is_none());
}

#[test]
fn test_empty_save_then_load_yields_empty_list() {
    let repository = SlotRepository::new(MemoryStore::new());
    assert!(repository.save_targets(&TargetList::new(HISTORY_CAPACITY)));

    let loaded = repository.load_targets().expect("group exists after save");
    assert!(loaded.is_empty());
}

#[test]
fn test_round_trip_preserves_order_and_fields() {
    let mut remote = Target::new(2, r"C:\svc\worker.exe", "svc", "build1");
    remote.is_attached = true;
    remote.engine = Some(EngineId("{engine-guid}".into()));
    let targets = list_of(vec![
        Target::local(1, r"C:\app\client.exe", "bob"),
        remote.clone(),
        Target::local(3, "/opt/tool", "alice"),
    ]);

    let repository = SlotRepository::new(MemoryStore::new());
    assert!(repository.save_targets(&targets));

    let loaded = repository.load_targets().unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.get(0).unwrap().process_path, r"C:\app\client.exe");
    assert_eq!(loaded.get(1).unwrap().process_path, r"C:\svc\worker.exe");
    assert_eq!(loaded.get(2).unwrap().process_path, "/opt/tool");

    let mid = loaded.get(1).unwrap();
    assert_eq!(mid.process_id, 2);
    assert_eq!(mid.process_name, "worker.exe");
    assert_eq!(mid.process_user, "svc");
    assert_eq!(mid.server_name, "build1");
    assert!(mid.is_attached);
    assert_eq!(mid.engine, remote.engine);
}

#[test]
fn test_save_writes_one_based_positional_slots() {
    let store = MemoryStore::new();
    let repository = SlotRepository::new(&store);
    let targets = list_of(vec![
        Target::local(1, "first.exe", "bob"),
        Target::local(2, "second.exe", "bob"),
    ]);
    assert!(repository.save_targets(&targets));

    let slot1 = store.raw_value(GROUP_KEY_NAME, &slot_key(1)).unwrap();
    let slot2 = store.raw_value(GROUP_KEY_NAME, &slot_key(2)).unwrap();
    assert!(slot1.contains("\"ProcessPath\":\"first.exe\""));
    assert!(slot2.contains("\"ProcessPath\":\"second.exe\""));
    assert!(store.raw_value(GROUP_KEY_NAME, &slot_key(3)).is_none());
}

#[test]
fn test_malformed_slot_is_skipped_without_failing_load() {
    let store = MemoryStore::new();
    store.seed_value(GROUP_KEY_NAME, &slot_key(1), VALID_SLOT);
    store.seed_value(GROUP_KEY_NAME, &slot_key(2), "invalid-json-item");
    store.seed_value(
        GROUP_KEY_NAME,
        &slot_key(3),
        &VALID_SLOT.replace("test1.exe", "test2.exe"),
    );

    let repository = SlotRepository::new(&store);
    let loaded = repository.load_targets().expect("partial corruption must not fail load");
    assert_eq!(loaded.len(), 2);
    // Relative order of the valid entries survives.
    assert_eq!(loaded.get(0).unwrap().process_path, "test1.exe");
    assert_eq!(loaded.get(1).unwrap().process_path, "test2.exe");
}

#[test]
fn test_save_deletes_orphaned_higher_slots() {
    let store = MemoryStore::new();
    let repository = SlotRepository::new(&store);

    let three = list_of(vec![
        Target::local(1, "a.exe", "bob"),
        Target::local(2, "b.exe", "bob"),
        Target::local(3, "c.exe", "bob"),
    ]);
    assert!(repository.save_targets(&three));

    let one = list_of(vec![Target::local(4, "d.exe", "bob")]);
    assert!(repository.save_targets(&one));

    assert!(store.raw_value(GROUP_KEY_NAME, &slot_key(2)).is_none());
    assert!(store.raw_value(GROUP_KEY_NAME, &slot_key(3)).is_none());

    let loaded = repository.load_targets().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get(0).unwrap().process_path, "d.exe");
}

#[test]
fn test_slots_beyond_capacity_are_never_read() {
    let store = MemoryStore::new();
    store.seed_value(GROUP_KEY_NAME, &slot_key(1), VALID_SLOT);
    // Leftover from a hypothetical larger prior capacity.
    store.seed_value(
        GROUP_KEY_NAME,
        &slot_key(HISTORY_CAPACITY + 1),
        &VALID_SLOT.replace("test1.exe", "stale.exe"),
    );

    let loaded = SlotRepository::new(&store).load_targets().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get(0).unwrap().process_path, "test1.exe");
}

/// Store whose group cannot be opened at all.
struct UnavailableStore;

impl SlotStore for UnavailableStore {
    fn open_group(&self, _name: &str, _writable: bool) -> Option<Box<dyn StoreGroup + '_>> {
        None
    }
}

#[test]
fn test_unopenable_store_fails_load_and_save() {
    let repository = SlotRepository::new(UnavailableStore);
    assert!(repository.load_targets().is_none());
    assert!(!repository.save_targets(&TargetList::new(HISTORY_CAPACITY)));
}

/// Store that opens fine but denies every write, counting handle drops so
/// the close-exactly-once guarantee is observable.
struct DenyingStore {
    drops: Rc<Cell<usize>>,
}

struct DenyingGroup {
    drops: Rc<Cell<usize>>,
}

impl SlotStore for DenyingStore {
    fn open_group(&self, _name: &str, _writable: bool) -> Option<Box<dyn StoreGroup + '_>> {
        Some(Box::new(DenyingGroup {
            drops: Rc::clone(&self.drops),
        }))
    }
}

impl StoreGroup for DenyingGroup {
    fn get_value(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_value(&mut self, _key: &str, _value: &str) -> Result<(), ReattachError> {
        Err(ReattachError::Denied("simulated no access on set".into()))
    }

    fn delete_value(&mut self, _key: &str) -> Result<(), ReattachError> {
        Err(ReattachError::Denied("simulated no access on delete".into()))
    }
}

impl Drop for DenyingGroup {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

#[test]
fn test_denied_writes_fail_save_but_close_the_group() {
    let drops = Rc::new(Cell::new(0));
    let repository = SlotRepository::new(DenyingStore {
        drops: Rc::clone(&drops),
    });

    // Empty history: only the orphan-slot deletes run, and they all fail.
    assert!(!repository.save_targets(&TargetList::new(HISTORY_CAPACITY)));
    assert_eq!(drops.get(), 1);

    let targets = list_of(vec![
        Target::local(1, "a.exe", "bob"),
        Target::local(2, "b.exe", "bob"),
        Target::local(3, "c.exe", "bob"),
    ]);
    assert!(!repository.save_targets(&targets));
    assert_eq!(drops.get(), 2);
}
