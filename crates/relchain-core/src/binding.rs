//! Relation bindings: snapshots of the values bound on a complete chain.
//!
//! A binding captures, per node index, the node's resolved name and both
//! bound tuples. It serializes to a plain document so it can ride along in
//! session state between requests, and restores into any relation of the
//! same shape.
//!
//! Each entry also has one attachment slot of type `A` for application data
//! that should travel with the snapshot. Attachments are never rebound.

use crate::error::RelationError;
use crate::node::{RelationNode, Side};
use crate::relation::Relation;
use crate::value::BindValue;
use serde::{Deserialize, Serialize};

/// The captured state of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "A: Serialize", deserialize = "A: Deserialize<'de>"))]
pub struct BindingEntry<A> {
    /// The node's resolved name at capture time.
    pub name: String,
    #[serde(default)]
    pub predecessor: Option<Vec<BindValue>>,
    #[serde(default)]
    pub successor: Option<Vec<BindValue>>,
    #[serde(default)]
    pub attachment: Option<A>,
}

impl<A> BindingEntry<A> {
    fn capture(node: &RelationNode) -> Self {
        Self {
            name: node.resolved_name(),
            predecessor: node.predecessor_values().map(<[BindValue]>::to_vec),
            successor: node.successor_values().map(<[BindValue]>::to_vec),
            attachment: None,
        }
    }

    pub fn values(&self, side: Side) -> Option<&[BindValue]> {
        match side {
            Side::Predecessor => self.predecessor.as_deref(),
            Side::Successor => self.successor.as_deref(),
        }
    }
}

/// A snapshot of the bound values of a complete relation.
///
/// The binding does not hold on to the relation: the relation is passed to
/// [`save`](Self::save) and [`restore`](Self::restore), so the caller keeps
/// ownership of the chain between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "A: Serialize", deserialize = "A: Deserialize<'de>"))]
pub struct RelationBinding<A = serde_json::Value> {
    #[serde(default)]
    entries: Option<Vec<BindingEntry<A>>>,
}

impl<A> RelationBinding<A> {
    /// A fresh binding for `relation`. Nothing is captured until `save`.
    pub fn create_on_relation(relation: &Relation) -> Self {
        tracing::trace!(nodes = relation.len(), "created relation binding");
        Self::new()
    }

    pub fn new() -> Self {
        Self { entries: None }
    }

    pub fn is_saved(&self) -> bool {
        self.entries.is_some()
    }

    /// Number of captured entries (0 when unsaved).
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Captured entries in node order (empty when unsaved).
    pub fn entries(&self) -> &[BindingEntry<A>] {
        self.entries.as_deref().unwrap_or_default()
    }

    fn capture(relation: &Relation) -> Result<Vec<BindingEntry<A>>, RelationError> {
        relation.check_complete()?;
        Ok(relation.nodes().iter().map(BindingEntry::capture).collect())
    }

    /// Capture the relation's bound values into this binding, replacing any
    /// earlier snapshot and its attachments.
    pub fn save(&mut self, relation: &Relation) -> Result<&mut Self, RelationError> {
        let entries = Self::capture(relation)?;
        tracing::debug!(nodes = entries.len(), "saved relation binding");
        self.entries = Some(entries);
        Ok(self)
    }

    /// Capture the relation's bound values into a new binding, leaving this
    /// one untouched.
    pub fn save_clone(&self, relation: &Relation) -> Result<Self, RelationError> {
        let entries = Self::capture(relation)?;
        tracing::debug!(nodes = entries.len(), "saved relation binding clone");
        Ok(Self {
            entries: Some(entries),
        })
    }

    /// Rebind every node of `relation` to the captured values.
    ///
    /// The relation must be complete and have the shape it had at capture
    /// time: same size, and the same resolved name at every index. Every
    /// check runs before any node is touched; on error the relation is
    /// unchanged.
    pub fn restore(&self, relation: &mut Relation) -> Result<(), RelationError> {
        relation.check_complete()?;
        let entries = self.entries.as_ref().ok_or(RelationError::NotSaved)?;

        if let Err(err) = Self::check_shape(entries, relation) {
            tracing::warn!(error = %err, "rejected relation binding restore");
            return Err(err);
        }

        for (index, entry) in entries.iter().enumerate() {
            if let Some(node) = relation.node_at_mut(index) {
                for side in Side::ALL {
                    node.bind(side, entry.values(side).map(<[BindValue]>::to_vec))?;
                }
            }
        }

        tracing::debug!(nodes = entries.len(), "restored relation binding");
        Ok(())
    }

    fn check_shape(
        entries: &[BindingEntry<A>],
        relation: &Relation,
    ) -> Result<(), RelationError> {
        if entries.len() != relation.len() {
            return Err(RelationError::SizeMismatch {
                expected: entries.len(),
                actual: relation.len(),
            });
        }

        for (index, (entry, node)) in entries.iter().zip(relation.nodes()).enumerate() {
            let actual = node.resolved_name();
            if entry.name != actual {
                return Err(RelationError::NameMismatch {
                    index,
                    expected: entry.name.clone(),
                    actual,
                });
            }
            for side in Side::ALL {
                node.check_bind(side, entry.values(side))?;
            }
        }

        Ok(())
    }

    /// Index of the captured entry named `name`, if any.
    pub fn name_to_index(&self, name: &str) -> Result<Option<usize>, RelationError> {
        let entries = self.entries.as_ref().ok_or(RelationError::NotSaved)?;
        Ok(entries.iter().position(|entry| entry.name == name))
    }

    fn resolve(&self, name: &str) -> Result<usize, RelationError> {
        self.name_to_index(name)?
            .ok_or_else(|| RelationError::UnknownNodeName {
                name: name.to_string(),
            })
    }

    /// Attach `data` to the entry named `name`, replacing any previous one.
    pub fn set_attachment(&mut self, name: &str, data: A) -> Result<(), RelationError> {
        let index = self.resolve(name)?;
        if let Some(entry) = self
            .entries
            .as_mut()
            .and_then(|entries| entries.get_mut(index))
        {
            entry.attachment = Some(data);
        }
        Ok(())
    }

    /// The attachment of the entry named `name`.
    pub fn attachment(&self, name: &str) -> Result<Option<&A>, RelationError> {
        let index = self.resolve(name)?;
        Ok(self.entries()[index].attachment.as_ref())
    }
}

impl<A> Default for RelationBinding<A> {
    fn default() -> Self {
        Self::new()
    }
}
