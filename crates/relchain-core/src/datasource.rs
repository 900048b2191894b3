//! Datasource naming rules.
//!
//! The relation core renders names for SQL-facing consumers but never
//! talks to a database. Whatever owns the connection supplies the quoting
//! and qualification rules through [`Datasource`].

use serde::{Deserialize, Serialize};

/// Identifier quoting and qualification rules of a datasource connection.
pub trait Datasource {
    /// Quote one identifier.
    fn quote_name(&self, name: &str) -> String;

    /// Map a logical set name to the physical dataset name (table prefix
    /// and the like), optionally quoted.
    fn qualify_dataset_name(&self, name: &str, quote: bool) -> String;

    /// Qualify property names with an already-resolved set name or alias.
    fn qualify_property_names(&self, names: &[String], set: &str, quote: bool) -> Vec<String> {
        names
            .iter()
            .map(|name| {
                if quote {
                    format!("{}.{}", self.quote_name(set), self.quote_name(name))
                } else {
                    format!("{set}.{name}")
                }
            })
            .collect()
    }
}

/// Config-driven datasource rules: quote characters and a dataset prefix.
///
/// Deserializes from the `[datasource]` table of a relation file; every
/// field is optional and defaults to ANSI double quotes with no prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasourceDialect {
    pub quote_open: char,
    pub quote_close: char,
    pub prefix: String,
}

impl DatasourceDialect {
    /// ANSI SQL: `"name"`.
    pub fn ansi() -> Self {
        Self {
            quote_open: '"',
            quote_close: '"',
            prefix: String::new(),
        }
    }

    /// MySQL: `` `name` ``.
    pub fn mysql() -> Self {
        Self {
            quote_open: '`',
            quote_close: '`',
            prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl Default for DatasourceDialect {
    fn default() -> Self {
        Self::ansi()
    }
}

impl Datasource for DatasourceDialect {
    fn quote_name(&self, name: &str) -> String {
        let mut escaped = String::with_capacity(name.len() + 2);
        escaped.push(self.quote_open);
        for ch in name.chars() {
            if ch == self.quote_close {
                escaped.push(ch);
            }
            escaped.push(ch);
        }
        escaped.push(self.quote_close);
        escaped
    }

    fn qualify_dataset_name(&self, name: &str, quote: bool) -> String {
        let physical = format!("{}{name}", self.prefix);
        if quote {
            self.quote_name(&physical)
        } else {
            physical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_quoting_doubles_embedded_quotes() {
        let ds = DatasourceDialect::ansi();
        assert_eq!(ds.quote_name("order"), "\"order\"");
        assert_eq!(ds.quote_name("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn prefix_applies_to_datasets_only() {
        let ds = DatasourceDialect::mysql().with_prefix("app_");
        assert_eq!(ds.qualify_dataset_name("order", true), "`app_order`");
        assert_eq!(ds.qualify_dataset_name("order", false), "app_order");
        assert_eq!(
            ds.qualify_property_names(&["id".to_string()], "o", true),
            vec!["`o`.`id`".to_string()]
        );
    }

    #[test]
    fn partial_config_falls_back_to_ansi() {
        let ds: DatasourceDialect = serde_json::from_str(r#"{"prefix":"x_"}"#).expect("parse");
        assert_eq!(ds.quote_open, '"');
        assert_eq!(ds.prefix, "x_");
    }
}
