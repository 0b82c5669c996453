#![deny(warnings)]

pub mod buffer;
pub mod config;
pub mod snapshot;

pub use buffer::{Cursor, Iter, RingBuffer, RingBufferError};
pub use snapshot::{Snapshot, SnapshotError};
