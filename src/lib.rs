//! reattach-history: remember previously attached debug targets.
//!
//! A debugger frontend that attaches to processes repeatedly benefits from a
//! short, persistent list of "targets I attached to recently". This crate is
//! that list: a fixed-capacity, deduplicating, most-recently-used history of
//! attach targets, persisted as positional key/value slots and reloaded
//! tolerantly (a corrupt slot is skipped, never fatal).
//!
//! # Architecture
//!
//! - [`core::target::Target`]: one attachable process (pid, path, user,
//!   optional server). Identity for deduplication is the case-insensitive
//!   (path, user, server) triple; pids are ephemeral and excluded.
//! - [`core::target_list::TargetList`]: the bounded MRU collection.
//! - [`core::history::History`]: a `TargetList` plus load/save orchestration
//!   against an injected repository. All storage failures surface as plain
//!   booleans at this boundary; nothing panics or propagates.
//! - [`core::repository`]: the JSON slot codec and the positional-slot
//!   repository, including cleanup of orphaned higher-indexed slots on save.
//! - [`core::store`]: the persistence contract (`SlotStore` / `StoreGroup`)
//!   with an in-memory backend; [`core::sqlite_store`] adds a durable
//!   SQLite-backed one.
//!
//! The host side (attach calls, UI, process enumeration) stays outside this
//! crate; [`core::source::TargetSource`] is the only nod to it, a contract
//! for enumerating live attach candidates.

pub mod core;
