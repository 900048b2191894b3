//! Model descriptors.
//!
//! A relation node is bound to a model: something with a name and a
//! backing set (table). The relation core only needs those two names and
//! a way to qualify property names to the set.

use crate::error::RelationError;
use crate::names::is_keyword;
use serde::{Deserialize, Serialize};

/// A model the relation core can describe.
pub trait Model {
    /// The model's own name (e.g. `Customer`).
    fn model_name(&self) -> &str;

    /// The name of the set/table holding the model's records.
    fn set_name(&self) -> &str;

    /// Qualify property names to this model's set.
    fn qualify_property_names(&self, names: &[String]) -> Vec<String> {
        names
            .iter()
            .map(|name| format!("{}.{name}", self.set_name()))
            .collect()
    }
}

/// Plain, owned description of a model.
///
/// Deserialization validates both names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ModelRecord")]
pub struct ModelDescriptor {
    pub name: String,
    pub set: String,
}

#[derive(Deserialize)]
struct ModelRecord {
    name: String,
    set: String,
}

impl TryFrom<ModelRecord> for ModelDescriptor {
    type Error = RelationError;

    fn try_from(record: ModelRecord) -> Result<Self, Self::Error> {
        let descriptor = Self::new(record.name, record.set);
        descriptor.validate()?;
        Ok(descriptor)
    }
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>, set: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            set: set.into(),
        }
    }

    /// Capture any [`Model`] as a descriptor, validating both names.
    pub fn describe(model: &(impl Model + ?Sized)) -> Result<Self, RelationError> {
        let descriptor = Self::new(model.model_name(), model.set_name());
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn validate(&self) -> Result<(), RelationError> {
        if !is_keyword(&self.name) {
            return Err(RelationError::InvalidModel {
                description: format!("model name `{}` is not a keyword", self.name),
            });
        }
        if !is_keyword(&self.set) {
            return Err(RelationError::InvalidModel {
                description: format!(
                    "set name `{}` of model {} is not a keyword",
                    self.set, self.name
                ),
            });
        }
        Ok(())
    }
}

impl Model for ModelDescriptor {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn set_name(&self) -> &str {
        &self.set
    }
}
