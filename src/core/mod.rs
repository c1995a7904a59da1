//! Core modules: the target data model, the MRU collection, and the
//! persistence layer it round-trips through.

pub mod error;
pub mod history;
pub mod repository;
pub mod source;
pub mod sqlite_store;
pub mod store;
pub mod target;
pub mod target_list;
