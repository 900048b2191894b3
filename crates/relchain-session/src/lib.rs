//! # relchain-session
//!
//! Session layer for relation state.
//!
//! This crate provides:
//! - `SessionStore`: the key/value seam a host session implements
//! - `MemorySessionStore` (per-process) and `FileSessionStore` (one JSON
//!   document on disk)
//! - helpers that persist and reload a `RelationBinding` under a key
//!   derived from the relation's shape
//!
//! It intentionally does not manage cookies or session lifetimes. Those
//! belong to the host web server.
//!
//! ## Data flow
//!
//! ```text
//! Relation ──save──▶ RelationBinding ──serialize──▶ SessionStore[key]
//!     ▲                                                   │
//!     └────restore──── RelationBinding ◀──deserialize─────┘
//! ```

pub mod binding;
pub mod error;
pub mod file;
pub mod store;

pub use binding::{binding_key, load_binding, save_binding, take_binding};
pub use error::SessionError;
pub use file::FileSessionStore;
pub use store::{MemorySessionStore, SessionStore};
