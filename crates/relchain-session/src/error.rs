//! Errors from session store operations.

use relchain_core::RelationError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Relation(#[from] RelationError),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("corrupted session file: {0}")]
    Corrupt(String),

    #[error("no session value under key `{0}`")]
    Missing(String),
}
