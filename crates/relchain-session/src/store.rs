//! The session store seam.

use crate::error::SessionError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Opaque key/value persistence for request-spanning state.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<Value>, SessionError>;

    fn put(&mut self, key: &str, value: Value) -> Result<(), SessionError>;

    /// Remove `key`, returning the previous value if present.
    fn remove(&mut self, key: &str) -> Result<Option<Value>, SessionError>;
}

/// Per-process session state.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: BTreeMap<String, Value>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<Value>, SessionError> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), SessionError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<Option<Value>, SessionError> {
        Ok(self.values.remove(key))
    }
}
