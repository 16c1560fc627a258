//! Servigo Session - Session store implementations
//!
//! Process-wide key-value storage for the authenticated identity state
//! (credential + role) and the UI preferences stored alongside it. Two
//! implementations of the `SessionStore` contract are provided:
//!
//! - `MemorySessionStore`: ephemeral, for tests and short-lived tools
//! - `FileSessionStore`: one JSON document on disk, survives restarts
//!
//! `SessionHandle` is the typed facade the rest of the system uses.

pub mod file;
pub mod handle;
pub mod memory;

pub use file::FileSessionStore;
pub use handle::SessionHandle;
pub use memory::MemorySessionStore;
