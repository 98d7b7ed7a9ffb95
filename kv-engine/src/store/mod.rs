//! # Value Stores
//!
//! One specialized map per value shape (string / list / dictionary), each
//! implementing the operations in spec §4.1. Every store is owned
//! exclusively by one shard actor — there is no internal locking, unlike
//! the teacher's `MemoryEngine`, whose `RwLock<ShardInner>` exists to let
//! one engine object be shared across OS threads. That problem does not
//! exist here: a shard's store is never touched outside its own task.

mod dictionary;
mod list;
mod string;

pub use dictionary::{DictionaryEntry, DictionaryStore};
pub use list::{ListEntry, ListStore};
pub use string::{StringEntry, StringStore};
