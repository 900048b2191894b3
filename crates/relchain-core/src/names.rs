//! Validated identifier lists.

use crate::error::RelationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

fn keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$").expect("keyword regex must compile")
    })
}

/// Whether `name` is keyword-shaped: a letter or underscore followed by up
/// to 63 letters, digits, or underscores.
pub fn is_keyword(name: &str) -> bool {
    keyword_re().is_match(name)
}

/// An ordered, non-empty list of unique, non-empty property names.
///
/// This is the only way to declare the properties of a reference; every
/// call shape (one name, several names, a collected list) goes through
/// [`PropertyNames::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PropertyNames(Vec<String>);

impl PropertyNames {
    pub fn new<I, S>(names: I) -> Result<Self, RelationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(RelationError::EmptyNameList);
        }

        let mut seen = BTreeSet::new();
        for (position, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(RelationError::EmptyName { position });
            }
            if !seen.insert(name.as_str()) {
                return Err(RelationError::DuplicateName { name: name.clone() });
            }
        }

        Ok(Self(names))
    }

    /// A single-name list.
    pub fn single(name: impl Into<String>) -> Result<Self, RelationError> {
        Self::new([name.into()])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for the `len` convention.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl IntoIterator for PropertyNames {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl TryFrom<Vec<String>> for PropertyNames {
    type Error = RelationError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PropertyNames> for Vec<String> {
    fn from(value: PropertyNames) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declaration_order() {
        let names = PropertyNames::new(["b", "a", "c"]).expect("valid names");
        assert_eq!(names.as_slice(), &["b", "a", "c"]);
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn rejects_empty_list() {
        let err = PropertyNames::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, RelationError::EmptyNameList);
    }

    #[test]
    fn rejects_empty_name() {
        let err = PropertyNames::new(["id", ""]).unwrap_err();
        assert_eq!(err, RelationError::EmptyName { position: 1 });
    }

    #[test]
    fn rejects_duplicate_name() {
        let err = PropertyNames::new(["id", "code", "id"]).unwrap_err();
        assert_eq!(
            err,
            RelationError::DuplicateName {
                name: "id".to_string()
            }
        );
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<PropertyNames>(r#"["a","a"]"#).is_err());
        assert!(serde_json::from_str::<PropertyNames>("[]").is_err());
        let names: PropertyNames = serde_json::from_str(r#"["a","b"]"#).expect("valid");
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn keyword_pattern() {
        assert!(is_keyword("order_2"));
        assert!(is_keyword("_tmp"));
        assert!(!is_keyword("2order"));
        assert!(!is_keyword("order item"));
        assert!(!is_keyword(""));
        assert!(!is_keyword(&"x".repeat(65)));
    }
}
