//! User storage for the user directory
//!
//! This crate provides a storage abstraction for user records. The directory
//! server uses the SQLite implementation; the in-memory implementation backs
//! tests.

mod error;
mod memory;
mod sqlite;
mod store;

pub use error::*;
pub use memory::*;
pub use sqlite::*;
pub use store::*;
