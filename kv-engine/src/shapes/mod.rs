//! Concrete `CacheShape` implementations, one per value shape.

mod dictionary;
mod list;
mod string;

pub use dictionary::{DictionaryCommand, DictionaryReply, DictionaryShape, DictionarySnapshotEntry};
pub use list::{ListCommand, ListReply, ListShape, ListSnapshotEntry};
pub use string::{StringCommand, StringReply, StringShape, StringSnapshotEntry};
