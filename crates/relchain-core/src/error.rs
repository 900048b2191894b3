//! Error types for relation chain operations.

use crate::node::Side;

/// Errors arising from relation node, relation, and binding operations.
///
/// Every variant classifies into one of two [`ErrorKind`]s: a structural
/// violation of an operation's contract, or malformed input to a builder
/// or validator call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelationError {
    /// A property name in a reference declaration is empty.
    #[error("invalid argument: empty property name at position {position}")]
    EmptyName { position: usize },

    /// A property name occurs twice in one reference declaration.
    #[error("invalid argument: duplicate property name `{name}`")]
    DuplicateName { name: String },

    /// A reference declaration carries no property names at all.
    #[error("invalid argument: reference requires at least one property name")]
    EmptyNameList,

    /// An alias does not match the keyword pattern.
    #[error("invalid argument: invalid alias `{alias}`")]
    InvalidAlias { alias: String },

    /// A model descriptor has an unusable model or set name.
    #[error("invalid argument: invalid model descriptor: {description}")]
    InvalidModel { description: String },

    /// A bound tuple does not have one value per declared property.
    #[error("invalid argument: {side} reference expects {expected} value(s), got {actual}")]
    ArityMismatch {
        side: Side,
        expected: usize,
        actual: usize,
    },

    /// An attachment was addressed by a name that was never captured.
    #[error("invalid argument: no captured node named `{name}`")]
    UnknownNodeName { name: String },

    /// A value was bound on a side that does not hold the foreign key.
    #[error("logic error: {side} reference is not declared referencing")]
    NotBindable { side: Side },

    /// The relation chain is not mutually consistent.
    #[error("logic error: relation is incomplete: {description}")]
    Incomplete { description: String },

    /// A binding was queried or restored before anything was captured.
    #[error("logic error: binding has not been saved")]
    NotSaved,

    /// The relation has a different number of nodes than at capture time.
    #[error("logic error: relation size changed since save: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The node at `index` resolves to a different name than at capture time.
    #[error(
        "logic error: relation shape changed at index {index}: expected `{expected}`, got `{actual}`"
    )]
    NameMismatch {
        index: usize,
        expected: String,
        actual: String,
    },
}

/// Which class of failure an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The operation was invoked in a state that cannot satisfy its contract.
    Logic,
    /// The operation received malformed input.
    InvalidArgument,
}

impl RelationError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyName { .. }
            | Self::DuplicateName { .. }
            | Self::EmptyNameList
            | Self::InvalidAlias { .. }
            | Self::InvalidModel { .. }
            | Self::ArityMismatch { .. }
            | Self::UnknownNodeName { .. } => ErrorKind::InvalidArgument,
            Self::NotBindable { .. }
            | Self::Incomplete { .. }
            | Self::NotSaved
            | Self::SizeMismatch { .. }
            | Self::NameMismatch { .. } => ErrorKind::Logic,
        }
    }

    pub fn is_logic(&self) -> bool {
        self.kind() == ErrorKind::Logic
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_splits_logic_from_arguments() {
        assert!(RelationError::NotSaved.is_logic());
        assert!(
            RelationError::NotBindable {
                side: Side::Predecessor
            }
            .is_logic()
        );
        assert!(RelationError::EmptyNameList.is_invalid_argument());
        assert!(
            RelationError::ArityMismatch {
                side: Side::Successor,
                expected: 2,
                actual: 1
            }
            .is_invalid_argument()
        );
    }

    #[test]
    fn messages_name_the_side() {
        let err = RelationError::ArityMismatch {
            side: Side::Successor,
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "invalid argument: successor reference expects 2 value(s), got 3"
        );
    }
}
