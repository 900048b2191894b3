//! Relation chains.
//!
//! A relation is an ordered list of nodes: node `i`'s successor reference
//! pairs with node `i + 1`'s predecessor reference. The chain owns its
//! nodes and addresses them by index; there are no links between nodes.
//!
//! A chain is *complete* when every adjacent pair agrees on the reference
//! between them: same width, and exactly one side holding the foreign key.

use crate::datasource::Datasource;
use crate::error::RelationError;
use crate::node::{RelationNode, Side};
use crate::value::BindValue;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An ordered chain of relation nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relation {
    nodes: Vec<RelationNode>,
}

/// One column pair of a join: the foreign-key column and the column it
/// points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPair {
    pub referencing: String,
    pub referenced: String,
}

/// The join between two adjacent nodes of a complete relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinCondition {
    /// Index of the node holding the foreign key.
    pub referencing_index: usize,
    /// Index of the node the foreign key points at.
    pub referenced_index: usize,
    pub columns: Vec<ColumnPair>,
    /// Foreign-key values currently bound on the referencing side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound: Option<Vec<BindValue>>,
}

impl Relation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<RelationNode>) -> Self {
        Self { nodes }
    }

    /// Append a node (builder form).
    pub fn with_node(mut self, node: RelationNode) -> Self {
        self.push(node);
        self
    }

    /// Append a node. Chains are validated on demand, not on push.
    pub fn push(&mut self, node: RelationNode) {
        self.nodes.push(node);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[RelationNode] {
        &self.nodes
    }

    pub fn node_at(&self, index: usize) -> Option<&RelationNode> {
        self.nodes.get(index)
    }

    pub fn node_at_mut(&mut self, index: usize) -> Option<&mut RelationNode> {
        self.nodes.get_mut(index)
    }

    /// Index of the first node whose resolved name is `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|node| node.resolved_name() == name)
    }

    pub fn is_complete(&self) -> bool {
        self.check_complete().is_ok()
    }

    /// Validate the chain, reporting the first defect found.
    pub fn check_complete(&self) -> Result<(), RelationError> {
        let incomplete = |description: String| Err(RelationError::Incomplete { description });

        if self.nodes.len() < 2 {
            return incomplete(format!(
                "a relation needs at least two nodes, found {}",
                self.nodes.len()
            ));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if !node.is_valid() {
                return incomplete(format!(
                    "node {index} `{}` declares no reference",
                    node.resolved_name()
                ));
            }
        }

        let first = &self.nodes[0];
        if first.wants_predecessor() {
            return incomplete(format!(
                "first node `{}` declares a predecessor reference",
                first.resolved_name()
            ));
        }
        let last_index = self.nodes.len() - 1;
        let last = &self.nodes[last_index];
        if last.wants_successor() {
            return incomplete(format!(
                "last node {last_index} `{}` declares a successor reference",
                last.resolved_name()
            ));
        }

        for (index, pair) in self.nodes.windows(2).enumerate() {
            let (left, right) = (&pair[0], &pair[1]);
            let (Some(outgoing), Some(incoming)) = (
                left.reference(Side::Successor),
                right.reference(Side::Predecessor),
            ) else {
                return incomplete(format!(
                    "nodes {index} `{}` and {} `{}` are not linked",
                    left.resolved_name(),
                    index + 1,
                    right.resolved_name()
                ));
            };

            if outgoing.width() != incoming.width() {
                return incomplete(format!(
                    "reference width mismatch between {index} `{}` ({}) and {} `{}` ({})",
                    left.resolved_name(),
                    outgoing.width(),
                    index + 1,
                    right.resolved_name(),
                    incoming.width()
                ));
            }

            if outgoing.is_referencing() == incoming.is_referencing() {
                let which = if outgoing.is_referencing() {
                    "both reference each other"
                } else {
                    "neither references the other"
                };
                return incomplete(format!(
                    "nodes {index} `{}` and {} `{}`: {which}",
                    left.resolved_name(),
                    index + 1,
                    right.resolved_name()
                ));
            }
        }

        Ok(())
    }

    /// Unbind every side of every node.
    pub fn clear_bindings(&mut self) {
        for node in &mut self.nodes {
            node.clear_bindings();
        }
    }

    /// Column pairs of every join in the chain, in chain order.
    ///
    /// Names are qualified by each node's name and rendered through
    /// `datasource` when given. Requires a complete relation.
    pub fn join_conditions(
        &self,
        datasource: Option<&dyn Datasource>,
    ) -> Result<Vec<JoinCondition>, RelationError> {
        self.check_complete()?;

        let conditions = self
            .nodes
            .windows(2)
            .enumerate()
            .map(|(index, pair)| {
                let (left, right) = (&pair[0], &pair[1]);
                let left_names = left.successor_names(datasource, true);
                let right_names = right.predecessor_names(datasource, true);

                let (referencing_index, referenced_index, bound, referencing, referenced) =
                    if left.can_bind_on_successor() {
                        (
                            index,
                            index + 1,
                            left.successor_values(),
                            left_names,
                            right_names,
                        )
                    } else {
                        (
                            index + 1,
                            index,
                            right.predecessor_values(),
                            right_names,
                            left_names,
                        )
                    };

                JoinCondition {
                    referencing_index,
                    referenced_index,
                    columns: referencing
                        .into_iter()
                        .zip(referenced)
                        .map(|(referencing, referenced)| ColumnPair {
                            referencing,
                            referenced,
                        })
                        .collect(),
                    bound: bound.map(<[BindValue]>::to_vec),
                }
            })
            .collect();

        Ok(conditions)
    }

    /// Digest of the chain's shape: resolved names, reference widths and
    /// directions, in order. Bound values do not contribute.
    pub fn shape_digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (index, node) in self.nodes.iter().enumerate() {
            hasher.update(format!("{index}:{}", node.resolved_name()).as_bytes());
            for side in Side::ALL {
                let shape = match node.reference(side) {
                    Some(reference) if reference.is_referencing() => {
                        format!(":{side}>{}", reference.width())
                    }
                    Some(reference) => format!(":{side}<{}", reference.width()),
                    None => format!(":{side}-"),
                };
                hasher.update(shape.as_bytes());
            }
            hasher.update(b"\n");
        }
        format!("{:x}", hasher.finalize())
    }
}

impl FromIterator<RelationNode> for Relation {
    fn from_iter<T: IntoIterator<Item = RelationNode>>(iter: T) -> Self {
        Self::from_nodes(iter.into_iter().collect())
    }
}
