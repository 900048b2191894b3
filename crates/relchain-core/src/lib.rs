//! # relchain core
//!
//! Chain-structured descriptions of foreign-key relationships between
//! models, and snapshots of the join values bound on them.
//!
//! This crate is **datasource-agnostic**: it never issues queries. It only
//! describes how models join, which values a join is restricted to, and how
//! those values survive a round trip through session state.
//!
//! ## Architecture
//!
//! ```text
//! Model / Datasource     ← Naming seams supplied by the host ORM
//!     │
//! RelationNode           ← One model, up to two typed references
//!     │
//! Relation               ← Ordered chain; node[i].succ ⟷ node[i+1].pred
//!     │
//! RelationBinding<A>     ← Snapshot of bound values, restorable by shape
//! ```

pub mod binding;
pub mod datasource;
pub mod error;
pub mod model;
pub mod names;
pub mod node;
pub mod relation;
pub mod value;

pub use binding::{BindingEntry, RelationBinding};
pub use datasource::{Datasource, DatasourceDialect};
pub use error::{ErrorKind, RelationError};
pub use model::{Model, ModelDescriptor};
pub use names::{PropertyNames, is_keyword};
pub use node::{BindMode, Reference, RelationNode, Side};
pub use relation::{ColumnPair, JoinCondition, Relation};
pub use value::{BindValue, tuple};
