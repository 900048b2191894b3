//! Relation nodes: one link of a relation chain.
//!
//! A node stands for one model and declares up to two references, one to
//! its predecessor in the chain and one to its successor. A reference is
//! *referencing* when this node's properties hold the foreign key pointing
//! at the neighbor, and *referenced* when the neighbor holds the key.
//!
//! ```text
//!   Customer            Order                 Product
//!   succ: [id] (ref'd)  pred: [customer_id]   pred: [id] (ref'd)
//!                       succ: [product_id]
//! ```
//!
//! Only referencing sides carry bound values: those are the foreign-key
//! values a join is restricted to. A node referencing on both sides is a
//! many-to-many junction.

use crate::datasource::Datasource;
use crate::error::RelationError;
use crate::model::{Model, ModelDescriptor};
use crate::names::{PropertyNames, is_keyword};
use crate::value::BindValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// One of the two neighbor positions of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Predecessor,
    Successor,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Predecessor, Side::Successor];

    /// The single-side mask for this side.
    pub fn mode(self) -> BindMode {
        match self {
            Self::Predecessor => BindMode::PREDECESSOR,
            Self::Successor => BindMode::SUCCESSOR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Predecessor => "predecessor",
            Self::Successor => "successor",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "predecessor" | "pred" | "p" => Ok(Self::Predecessor),
            "successor" | "succ" | "s" => Ok(Self::Successor),
            _ => Err(format!("unknown side: {s}")),
        }
    }
}

/// Bitmask over [`Side`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindMode(u8);

impl BindMode {
    pub const NONE: Self = Self(0);
    pub const PREDECESSOR: Self = Self(1);
    pub const SUCCESSOR: Self = Self(2);
    pub const BOTH: Self = Self(3);

    /// Build a mask from raw bits; bits outside both sides are dropped.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & Self::BOTH.0)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every side in `other` is also in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn has(self, side: Side) -> bool {
        self.contains(side.mode())
    }
}

impl BitOr for BindMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for BindMode {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl From<Side> for BindMode {
    fn from(side: Side) -> Self {
        side.mode()
    }
}

/// A declared association on one side of a node.
///
/// Only deserialized as part of a [`RelationNode`], which checks its
/// values against the side it sits on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    names: PropertyNames,
    referencing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    values: Option<Vec<BindValue>>,
}

impl Reference {
    fn new(names: PropertyNames, referencing: bool) -> Self {
        Self {
            names,
            referencing,
            values: None,
        }
    }

    pub fn names(&self) -> &PropertyNames {
        &self.names
    }

    /// True when this node stores the foreign key pointing at the neighbor.
    pub fn is_referencing(&self) -> bool {
        self.referencing
    }

    pub fn width(&self) -> usize {
        self.names.len()
    }

    pub fn values(&self) -> Option<&[BindValue]> {
        self.values.as_deref()
    }
}

/// One position in a relation chain.
///
/// Deserialization replays the builders: the model, the alias and every
/// stored tuple are validated as if declared and bound by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NodeRecord")]
pub struct RelationNode {
    model: ModelDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    predecessor: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    successor: Option<Reference>,
}

#[derive(Deserialize)]
struct ReferenceRecord {
    names: PropertyNames,
    referencing: bool,
    #[serde(default)]
    values: Option<Vec<BindValue>>,
}

#[derive(Deserialize)]
struct NodeRecord {
    model: ModelDescriptor,
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    predecessor: Option<ReferenceRecord>,
    #[serde(default)]
    successor: Option<ReferenceRecord>,
}

impl TryFrom<NodeRecord> for RelationNode {
    type Error = RelationError;

    fn try_from(record: NodeRecord) -> Result<Self, Self::Error> {
        let mut node = Self::create_on_model(&record.model)?;
        node.set_alias(record.alias.as_deref())?;
        for (side, reference) in [
            (Side::Predecessor, record.predecessor),
            (Side::Successor, record.successor),
        ] {
            if let Some(reference) = reference {
                *node.reference_slot(side) =
                    Some(Reference::new(reference.names, reference.referencing));
                node.bind(side, reference.values)?;
            }
        }
        Ok(node)
    }
}

impl RelationNode {
    /// Create an unbound node without references on `model`.
    pub fn create_on_model(model: &(impl Model + ?Sized)) -> Result<Self, RelationError> {
        Ok(Self {
            model: ModelDescriptor::describe(model)?,
            alias: None,
            predecessor: None,
            successor: None,
        })
    }

    // -- reference declarations ------------------------------------------

    /// This node holds the foreign key `names` pointing at its predecessor.
    pub fn make_referencing_predecessor_in<I, S>(self, names: I) -> Result<Self, RelationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(Side::Predecessor, names, true)
    }

    /// The predecessor holds a foreign key matched against `names` here.
    pub fn make_referenced_by_predecessor_on<I, S>(self, names: I) -> Result<Self, RelationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(Side::Predecessor, names, false)
    }

    /// This node holds the foreign key `names` pointing at its successor.
    pub fn make_referencing_successor_in<I, S>(self, names: I) -> Result<Self, RelationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(Side::Successor, names, true)
    }

    /// The successor holds a foreign key matched against `names` here.
    pub fn make_referenced_by_successor_on<I, S>(self, names: I) -> Result<Self, RelationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declare(Side::Successor, names, false)
    }

    /// Declare (or redeclare) the reference on `side`.
    ///
    /// Redeclaring replaces the previous reference, bound values included.
    pub fn declare<I, S>(
        mut self,
        side: Side,
        names: I,
        referencing: bool,
    ) -> Result<Self, RelationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = PropertyNames::new(names)?;
        tracing::trace!(
            model = %self.model.name,
            %side,
            referencing,
            width = names.len(),
            "declared reference"
        );
        *self.reference_slot(side) = Some(Reference::new(names, referencing));
        Ok(self)
    }

    // -- alias -----------------------------------------------------------

    /// Override the name used to address this node's set; `None` clears.
    pub fn set_alias(&mut self, alias: Option<&str>) -> Result<&mut Self, RelationError> {
        match alias {
            Some(alias) if !is_keyword(alias) => {
                return Err(RelationError::InvalidAlias {
                    alias: alias.to_string(),
                });
            }
            Some(alias) => self.alias = Some(alias.to_string()),
            None => self.alias = None,
        }
        Ok(self)
    }

    /// Builder form of [`set_alias`](Self::set_alias).
    pub fn with_alias(mut self, alias: &str) -> Result<Self, RelationError> {
        self.set_alias(Some(alias))?;
        Ok(self)
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn model(&self) -> &ModelDescriptor {
        &self.model
    }

    // -- structural queries ----------------------------------------------

    pub fn reference(&self, side: Side) -> Option<&Reference> {
        match side {
            Side::Predecessor => self.predecessor.as_ref(),
            Side::Successor => self.successor.as_ref(),
        }
    }

    fn reference_slot(&mut self, side: Side) -> &mut Option<Reference> {
        match side {
            Side::Predecessor => &mut self.predecessor,
            Side::Successor => &mut self.successor,
        }
    }

    /// A node needs at least one reference to take part in a chain.
    pub fn is_valid(&self) -> bool {
        self.predecessor.is_some() || self.successor.is_some()
    }

    /// Exactly one reference: the start or the end of a chain.
    pub fn is_end_point(&self) -> bool {
        self.predecessor.is_some() != self.successor.is_some()
    }

    /// Referencing on both sides: a junction between its two neighbors.
    pub fn is_many_to_many(&self) -> bool {
        self.can_bind_on_predecessor() && self.can_bind_on_successor()
    }

    pub fn wants_predecessor(&self) -> bool {
        self.predecessor.is_some()
    }

    pub fn wants_successor(&self) -> bool {
        self.successor.is_some()
    }

    pub fn can_bind_on(&self, side: Side) -> bool {
        self.reference(side).is_some_and(Reference::is_referencing)
    }

    pub fn can_bind_on_predecessor(&self) -> bool {
        self.can_bind_on(Side::Predecessor)
    }

    pub fn can_bind_on_successor(&self) -> bool {
        self.can_bind_on(Side::Successor)
    }

    /// Mask of the sides that accept bound values.
    pub fn bind_mode(&self) -> BindMode {
        Side::ALL
            .into_iter()
            .filter(|side| self.can_bind_on(*side))
            .fold(BindMode::NONE, |mode, side| mode | side.mode())
    }

    /// Number of properties declared on `side` (0 when undeclared).
    pub fn reference_width(&self, side: Side) -> usize {
        self.reference(side).map_or(0, Reference::width)
    }

    pub fn predecessor_reference_width(&self) -> usize {
        self.reference_width(Side::Predecessor)
    }

    pub fn successor_reference_width(&self) -> usize {
        self.reference_width(Side::Successor)
    }

    // -- binding ---------------------------------------------------------

    /// Mask of satisfied sides: a side is satisfied when it is not
    /// bindable, or bindable and currently valued.
    pub fn bind_state(&self) -> BindMode {
        Side::ALL
            .into_iter()
            .filter(|side| !self.can_bind_on(*side) || self.values(*side).is_some())
            .fold(BindMode::NONE, |mode, side| mode | side.mode())
    }

    /// Whether every side in `mode` is satisfied.
    pub fn is_bound_on(&self, mode: impl Into<BindMode>) -> bool {
        self.bind_state().contains(mode.into())
    }

    /// Bind (or with `None`, unbind) the predecessor foreign key.
    pub fn bind_on_predecessor(
        &mut self,
        values: Option<Vec<BindValue>>,
    ) -> Result<&mut Self, RelationError> {
        self.bind(Side::Predecessor, values)?;
        Ok(self)
    }

    /// Bind (or with `None`, unbind) the successor foreign key.
    pub fn bind_on_successor(
        &mut self,
        values: Option<Vec<BindValue>>,
    ) -> Result<&mut Self, RelationError> {
        self.bind(Side::Successor, values)?;
        Ok(self)
    }

    /// Assign the bound tuple of `side`.
    ///
    /// `None` always succeeds and clears whatever is bound, whatever the
    /// direction of the reference.
    pub fn bind(
        &mut self,
        side: Side,
        values: Option<Vec<BindValue>>,
    ) -> Result<(), RelationError> {
        self.check_bind(side, values.as_deref())?;
        tracing::trace!(
            model = %self.model.name,
            %side,
            bound = values.is_some(),
            "bind"
        );
        if let Some(reference) = self.reference_slot(side) {
            reference.values = values;
        }
        Ok(())
    }

    /// Validate a bind without applying it.
    pub fn check_bind(
        &self,
        side: Side,
        values: Option<&[BindValue]>,
    ) -> Result<(), RelationError> {
        let Some(values) = values else {
            return Ok(());
        };
        let reference = self
            .reference(side)
            .filter(|reference| reference.is_referencing())
            .ok_or(RelationError::NotBindable { side })?;
        if values.len() != reference.width() {
            return Err(RelationError::ArityMismatch {
                side,
                expected: reference.width(),
                actual: values.len(),
            });
        }
        Ok(())
    }

    /// Drop the bound tuples of both sides.
    pub fn clear_bindings(&mut self) {
        for side in Side::ALL {
            if let Some(reference) = self.reference_slot(side) {
                reference.values = None;
            }
        }
    }

    pub fn values(&self, side: Side) -> Option<&[BindValue]> {
        self.reference(side).and_then(Reference::values)
    }

    pub fn predecessor_values(&self) -> Option<&[BindValue]> {
        self.values(Side::Predecessor)
    }

    pub fn successor_values(&self) -> Option<&[BindValue]> {
        self.values(Side::Successor)
    }

    // -- names -----------------------------------------------------------

    /// The name addressing this node's set.
    ///
    /// The alias wins unless `ignore_alias`; otherwise the set name. With a
    /// datasource the alias is quoted and the set name is qualified and
    /// quoted.
    pub fn name(&self, ignore_alias: bool, datasource: Option<&dyn Datasource>) -> String {
        match (&self.alias, ignore_alias, datasource) {
            (Some(alias), false, Some(ds)) => ds.quote_name(alias),
            (Some(alias), false, None) => alias.clone(),
            (_, _, Some(ds)) => ds.qualify_dataset_name(&self.model.set, true),
            (_, _, None) => self.model.set.clone(),
        }
    }

    /// The resolved name used to identify this node inside a chain.
    pub fn resolved_name(&self) -> String {
        self.name(false, None)
    }

    /// `set AS alias` when aliased, the set name otherwise.
    pub fn full_name(&self, datasource: Option<&dyn Datasource>) -> String {
        let set = self.name(true, datasource);
        if self.alias.is_some() {
            format!("{set} AS {}", self.name(false, datasource))
        } else {
            set
        }
    }

    /// Declared property names of `side`, optionally qualified by this
    /// node's name and quoted by `datasource`. Empty when undeclared.
    pub fn reference_names(
        &self,
        side: Side,
        datasource: Option<&dyn Datasource>,
        qualify: bool,
    ) -> Vec<String> {
        let Some(reference) = self.reference(side) else {
            return Vec::new();
        };
        let names = reference.names().as_slice();

        match (datasource, qualify) {
            (Some(ds), true) => {
                let owner = self
                    .alias
                    .clone()
                    .unwrap_or_else(|| ds.qualify_dataset_name(&self.model.set, false));
                ds.qualify_property_names(names, &owner, true)
            }
            (Some(ds), false) => names.iter().map(|name| ds.quote_name(name)).collect(),
            (None, true) => match &self.alias {
                Some(alias) => names.iter().map(|name| format!("{alias}.{name}")).collect(),
                None => self.model.qualify_property_names(names),
            },
            (None, false) => names.to_vec(),
        }
    }

    pub fn predecessor_names(
        &self,
        datasource: Option<&dyn Datasource>,
        qualify: bool,
    ) -> Vec<String> {
        self.reference_names(Side::Predecessor, datasource, qualify)
    }

    pub fn successor_names(
        &self,
        datasource: Option<&dyn Datasource>,
        qualify: bool,
    ) -> Vec<String> {
        self.reference_names(Side::Successor, datasource, qualify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::DatasourceDialect;
    use crate::value::tuple;

    fn node(name: &str, set: &str) -> RelationNode {
        RelationNode::create_on_model(&ModelDescriptor::new(name, set)).expect("valid model")
    }

    #[test]
    fn fresh_node_is_invalid() {
        let n = node("Order", "order");
        assert!(!n.is_valid());
        assert!(!n.is_end_point());
        assert_eq!(n.bind_mode(), BindMode::NONE);
        assert!(n.predecessor_names(None, false).is_empty());
        assert_eq!(n.predecessor_values(), None);
    }

    #[test]
    fn deserialization_validates() {
        let parse = |text: &str| serde_json::from_str::<RelationNode>(text);

        let err = parse(r#"{"model":{"name":"Order","set":"order"},"alias":"not an alias!"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid alias"));

        assert!(parse(r#"{"model":{"name":"Item","set":"order items"}}"#).is_err());

        let err = parse(
            r#"{"model":{"name":"Customer","set":"customer"},
                "successor":{"names":["id"],"referencing":false,"values":[1,2,3]}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not declared referencing"));

        let err = parse(
            r#"{"model":{"name":"Order","set":"order"},
                "predecessor":{"names":["customer_id"],"referencing":true,"values":[7,8]}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("expects 1 value(s), got 2"));

        let n = parse(
            r#"{"model":{"name":"Order","set":"order"},"alias":"o",
                "predecessor":{"names":["customer_id"],"referencing":true,"values":[7]}}"#,
        )
        .expect("valid node");
        assert_eq!(n.alias(), Some("o"));
        assert_eq!(n.predecessor_values(), Some(&tuple([7])[..]));
    }

    #[test]
    fn serialized_node_deserializes_back() {
        let mut n = node("Order", "order")
            .make_referencing_predecessor_in(["customer_id"])
            .and_then(|n| n.make_referenced_by_successor_on(["id"]))
            .and_then(|n| n.with_alias("o"))
            .expect("declared");
        n.bind_on_predecessor(Some(tuple([7]))).expect("bind");

        let text = serde_json::to_string(&n).expect("serialize");
        let back: RelationNode = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, n);
    }

    #[test]
    fn create_rejects_bad_descriptor() {
        let err = RelationNode::create_on_model(&ModelDescriptor::new("Order", "order items"))
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn reference_width_matches_declaration() {
        let n = node("Order", "order")
            .make_referencing_predecessor_in(["customer_id", "customer_site"])
            .expect("declare")
            .make_referenced_by_successor_on(["id"])
            .expect("declare");
        assert_eq!(n.predecessor_reference_width(), 2);
        assert_eq!(n.successor_reference_width(), 1);
        assert!(n.is_valid());
        assert!(!n.is_end_point());
    }

    #[test]
    fn declaration_rejects_malformed_names() {
        let dup = node("Order", "order").make_referencing_predecessor_in(["a", "a"]);
        assert!(matches!(dup, Err(RelationError::DuplicateName { .. })));

        let empty = node("Order", "order").make_referenced_by_successor_on([""]);
        assert!(matches!(empty, Err(RelationError::EmptyName { .. })));

        let none = node("Order", "order").make_referencing_successor_in(Vec::<String>::new());
        assert!(matches!(none, Err(RelationError::EmptyNameList)));
    }

    #[test]
    fn many_to_many_requires_both_sides_referencing() {
        let only_pred = node("A", "a")
            .make_referencing_predecessor_in(["x"])
            .expect("declare");
        let only_succ = node("A", "a")
            .make_referencing_successor_in(["x"])
            .expect("declare");
        let mixed = node("A", "a")
            .make_referencing_predecessor_in(["x"])
            .and_then(|n| n.make_referenced_by_successor_on(["y"]))
            .expect("declare");
        let mixed_other_way = node("A", "a")
            .make_referenced_by_predecessor_on(["x"])
            .and_then(|n| n.make_referencing_successor_in(["y"]))
            .expect("declare");
        let junction = node("A", "a")
            .make_referencing_predecessor_in(["x"])
            .and_then(|n| n.make_referencing_successor_in(["y"]))
            .expect("declare");

        assert!(!only_pred.is_many_to_many());
        assert!(!only_succ.is_many_to_many());
        assert!(!mixed.is_many_to_many());
        assert!(!mixed_other_way.is_many_to_many());
        assert!(junction.is_many_to_many());
        assert_eq!(junction.bind_mode(), BindMode::BOTH);
    }

    #[test]
    fn binding_referenced_side_is_a_logic_error() {
        let mut n = node("Customer", "customer")
            .make_referenced_by_predecessor_on(["id"])
            .expect("declare");
        let err = n.bind_on_predecessor(Some(tuple([1]))).unwrap_err();
        assert_eq!(
            err,
            RelationError::NotBindable {
                side: Side::Predecessor
            }
        );
        assert!(err.is_logic());

        let undeclared = n.bind_on_successor(Some(tuple([1]))).unwrap_err();
        assert!(undeclared.is_logic());
    }

    #[test]
    fn binding_wrong_arity_is_invalid_argument() {
        let mut n = node("Order", "order")
            .make_referencing_successor_in(["a", "b"])
            .expect("declare");
        let err = n.bind_on_successor(Some(tuple([1]))).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(n.successor_values(), None);
    }

    #[test]
    fn binding_none_always_clears() {
        let mut n = node("Order", "order")
            .make_referencing_successor_in(["a"])
            .and_then(|n| n.make_referenced_by_predecessor_on(["id"]))
            .expect("declare");
        n.bind_on_successor(Some(tuple([5]))).expect("bind");
        assert_eq!(n.successor_values(), Some(&[BindValue::Int(5)][..]));

        n.bind_on_successor(None).expect("unbind");
        assert_eq!(n.successor_values(), None);

        n.bind_on_predecessor(None).expect("unbind referenced side");
        let mut bare = node("X", "x");
        bare.bind_on_predecessor(None).expect("unbind undeclared side");
    }

    #[test]
    fn bind_state_treats_unbindable_sides_as_satisfied() {
        let mut n = node("Order", "order")
            .make_referenced_by_predecessor_on(["id"])
            .and_then(|n| n.make_referencing_successor_in(["product_id"]))
            .expect("declare");

        assert_eq!(n.bind_state(), BindMode::PREDECESSOR);
        assert!(n.is_bound_on(Side::Predecessor));
        assert!(!n.is_bound_on(Side::Successor));
        assert!(!n.is_bound_on(BindMode::BOTH));
        assert!(n.is_bound_on(BindMode::NONE));

        n.bind_on_successor(Some(tuple([9]))).expect("bind");
        assert_eq!(n.bind_state(), BindMode::BOTH);
        assert!(n.is_bound_on(BindMode::BOTH));
    }

    #[test]
    fn redeclaring_drops_bound_values() {
        let mut n = node("Order", "order")
            .make_referencing_successor_in(["a"])
            .expect("declare");
        n.bind_on_successor(Some(tuple([1]))).expect("bind");
        let n = n.make_referencing_successor_in(["a"]).expect("redeclare");
        assert_eq!(n.successor_values(), None);
    }

    #[test]
    fn alias_validation() {
        let mut n = node("Order", "order");
        assert!(n.set_alias(Some("o")).is_ok());
        assert_eq!(n.alias(), Some("o"));
        assert!(matches!(
            n.set_alias(Some("o rder")),
            Err(RelationError::InvalidAlias { .. })
        ));
        assert_eq!(n.alias(), Some("o"));
        n.set_alias(None).expect("clear");
        assert_eq!(n.alias(), None);
    }

    #[test]
    fn name_resolution() {
        let ds = DatasourceDialect::ansi().with_prefix("app_");
        let plain = node("Order", "order");
        assert_eq!(plain.name(false, None), "order");
        insta::assert_snapshot!(plain.name(false, Some(&ds)), @r#""app_order""#);
        assert_eq!(plain.full_name(None), "order");

        let aliased = plain.clone().with_alias("o").expect("alias");
        assert_eq!(aliased.name(false, None), "o");
        assert_eq!(aliased.name(true, None), "order");
        insta::assert_snapshot!(aliased.full_name(Some(&ds)), @r#""app_order" AS "o""#);
        assert_eq!(aliased.full_name(None), "order AS o");
    }

    #[test]
    fn reference_name_rendering() {
        let ds = DatasourceDialect::mysql().with_prefix("app_");
        let n = node("Order", "order")
            .make_referencing_predecessor_in(["customer_id", "site"])
            .expect("declare");

        assert_eq!(n.predecessor_names(None, false), vec!["customer_id", "site"]);
        assert_eq!(
            n.predecessor_names(None, true),
            vec!["order.customer_id", "order.site"]
        );
        assert_eq!(
            n.predecessor_names(Some(&ds), false),
            vec!["`customer_id`", "`site`"]
        );
        insta::assert_snapshot!(
            n.predecessor_names(Some(&ds), true).join(", "),
            @"`app_order`.`customer_id`, `app_order`.`site`"
        );

        let aliased = n.with_alias("o").expect("alias");
        assert_eq!(
            aliased.predecessor_names(None, true),
            vec!["o.customer_id", "o.site"]
        );
        assert_eq!(
            aliased.predecessor_names(Some(&ds), true),
            vec!["`o`.`customer_id`", "`o`.`site`"]
        );
        assert!(aliased.successor_names(Some(&ds), true).is_empty());
    }

    #[test]
    fn side_parsing() {
        assert_eq!("pred".parse::<Side>().unwrap(), Side::Predecessor);
        assert_eq!("Successor".parse::<Side>().unwrap(), Side::Successor);
        assert!("middle".parse::<Side>().is_err());
    }
}
