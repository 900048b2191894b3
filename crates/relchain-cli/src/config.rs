//! Relation definition files.
//!
//! ```toml
//! [datasource]
//! quote_open = "`"
//! quote_close = "`"
//! prefix = "app_"
//!
//! [[node]]
//! model = "Customer"
//! set = "customer"
//! successor = { names = ["id"], referencing = false }
//!
//! [[node]]
//! model = "Order"
//! set = "order"
//! alias = "o"
//! predecessor = { names = ["customer_id"], referencing = true }
//! ```

use relchain_core::{
    BindValue, DatasourceDialect, ModelDescriptor, Relation, RelationError, RelationNode, Side,
};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("node {index}: {source}")]
    Node {
        index: usize,
        #[source]
        source: RelationError,
    },

    #[error("invalid binding `{raw}`: {message}")]
    Bind { raw: String, message: String },
}

/// A relation definition as written on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationFile {
    #[serde(default)]
    pub datasource: DatasourceDialect,
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    pub model: String,
    pub set: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub predecessor: Option<ReferenceSpec>,
    #[serde(default)]
    pub successor: Option<ReferenceSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceSpec {
    pub names: Vec<String>,
    pub referencing: bool,
}

impl RelationFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    pub fn parse(text: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Build a fresh, unbound relation from the node specs.
    pub fn build(&self) -> Result<Relation, ConfigError> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                spec.build()
                    .map_err(|source| ConfigError::Node { index, source })
            })
            .collect()
    }
}

impl NodeSpec {
    fn build(&self) -> Result<RelationNode, RelationError> {
        let model = ModelDescriptor::new(&self.model, &self.set);
        let mut node = RelationNode::create_on_model(&model)?;
        if let Some(reference) = &self.predecessor {
            node = node.declare(
                Side::Predecessor,
                reference.names.iter().cloned(),
                reference.referencing,
            )?;
        }
        if let Some(reference) = &self.successor {
            node = node.declare(
                Side::Successor,
                reference.names.iter().cloned(),
                reference.referencing,
            )?;
        }
        node.set_alias(self.alias.as_deref())?;
        Ok(node)
    }
}

/// One `--bind INDEX:SIDE:V1,V2` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindArg {
    pub index: usize,
    pub side: Side,
    pub values: Vec<BindValue>,
}

impl BindArg {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::Bind {
            raw: raw.to_string(),
            message,
        };

        let mut parts = raw.splitn(3, ':');
        let (Some(index), Some(side), Some(values)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("expected INDEX:SIDE:V1,V2".to_string()));
        };

        let index = index
            .trim()
            .parse::<usize>()
            .map_err(|e| invalid(format!("bad index: {e}")))?;
        let side = side.trim().parse::<Side>().map_err(invalid)?;
        let values = values
            .split(',')
            .enumerate()
            .map(|(position, value)| match value.trim() {
                "" => Err(invalid(format!("empty value at position {position}"))),
                value => Ok(BindValue::parse_literal(value)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            index,
            side,
            values,
        })
    }

    /// Apply this binding to `relation`.
    pub fn apply(&self, relation: &mut Relation) -> Result<(), ConfigError> {
        let node = relation
            .node_at_mut(self.index)
            .ok_or_else(|| ConfigError::Bind {
                raw: format!("{}:{}", self.index, self.side),
                message: "no node at this index".to_string(),
            })?;
        node.bind(self.side, Some(self.values.clone()))
            .map_err(|source| ConfigError::Node {
                index: self.index,
                source,
            })
    }
}
