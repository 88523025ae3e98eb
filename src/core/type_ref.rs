//! Type references with explicit nullability and list wrappers

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Scalars every schema understands without registration
pub const BUILT_IN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

/// Check a type, field or argument name against the GraphQL name grammar
pub fn is_valid_name(name: &str) -> bool {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NAME_REGEX.get_or_init(|| {
        Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").expect("name pattern is valid")
    });
    regex.is_match(name)
}

pub fn is_builtin_scalar(name: &str) -> bool {
    BUILT_IN_SCALARS.contains(&name)
}

/// Whether a non-null value is representable by a built-in scalar
///
/// `Int` is limited to 32 bits; `ID` takes strings and integers.
pub fn scalar_accepts(type_name: &str, value: &Value) -> bool {
    match type_name {
        "Int" => value.as_i64().is_some_and(|n| i32::try_from(n).is_ok()),
        "Float" => value.is_number(),
        "String" => value.is_string(),
        "Boolean" => value.is_boolean(),
        "ID" => value.is_string() || value.is_i64() || value.is_u64(),
        _ => false,
    }
}

/// A reference to a named type, optionally wrapped as list and/or non-null
///
/// `[Post!]!` is `TypeRef { name: "Post", non_null: true, list: true,
/// list_element_non_null: true }`. Only one level of list nesting exists.
/// `list_element_non_null` is always `false` when `list` is `false`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    pub non_null: bool,
    pub list: bool,
    pub list_element_non_null: bool,
}

impl TypeRef {
    pub fn new(
        name: impl Into<String>,
        non_null: bool,
        list: bool,
        list_element_non_null: bool,
    ) -> Self {
        Self {
            name: name.into(),
            non_null,
            list,
            list_element_non_null: list && list_element_non_null,
        }
    }

    /// `Name`
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, false, false, false)
    }

    /// `Name!`
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, true, false, false)
    }

    /// `[Name]`
    pub fn list_of(name: impl Into<String>) -> Self {
        Self::new(name, false, true, false)
    }

    /// `[Name!]!`
    pub fn required_list_of(name: impl Into<String>) -> Self {
        Self::new(name, true, true, true)
    }

    pub fn is_builtin_scalar(&self) -> bool {
        is_builtin_scalar(&self.name)
    }

    /// Check an input value against this scalar type reference
    ///
    /// A single value is accepted where a list is expected, as GraphQL input
    /// coercion wraps it in a one-element list.
    pub fn accepts_input(&self, value: &Value) -> bool {
        if value.is_null() {
            return !self.non_null;
        }
        match value {
            Value::Array(items) if self.list => items.iter().all(|item| {
                if item.is_null() {
                    !self.list_element_non_null
                } else {
                    scalar_accepts(&self.name, item)
                }
            }),
            _ => scalar_accepts(&self.name, value),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.list {
            let element_bang = if self.list_element_non_null { "!" } else { "" };
            write!(f, "[{}{}]", self.name, element_bang)?;
        } else {
            write!(f, "{}", self.name)?;
        }
        if self.non_null {
            write!(f, "!")?;
        }
        Ok(())
    }
}

/// A type reference string that is not `Name`, `Name!`, `[Name]` or `[Name!]` (optionally `!`)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed type reference '{text}'")]
pub struct TypeRefParseError {
    pub text: String,
}

impl FromStr for TypeRef {
    type Err = TypeRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TypeRefParseError {
            text: s.to_string(),
        };

        let text = s.trim();
        let (text, non_null) = match text.strip_suffix('!') {
            Some(rest) => (rest.trim_end(), true),
            None => (text, false),
        };

        let type_ref = match text.strip_prefix('[') {
            Some(rest) => {
                let inner = rest.strip_suffix(']').ok_or_else(malformed)?.trim();
                let (name, element_non_null) = match inner.strip_suffix('!') {
                    Some(name) => (name.trim_end(), true),
                    None => (inner, false),
                };
                if !is_valid_name(name) {
                    return Err(malformed());
                }
                TypeRef::new(name, non_null, true, element_non_null)
            }
            None => {
                if !is_valid_name(text) {
                    return Err(malformed());
                }
                TypeRef::new(text, non_null, false, false)
            }
        };

        Ok(type_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_all_wrappings() {
        assert_eq!(TypeRef::named("Post").to_string(), "Post");
        assert_eq!(TypeRef::required("Post").to_string(), "Post!");
        assert_eq!(TypeRef::list_of("Post").to_string(), "[Post]");
        assert_eq!(TypeRef::required_list_of("Post").to_string(), "[Post!]!");
        assert_eq!(TypeRef::new("Int", false, true, true).to_string(), "[Int!]");
    }

    #[test]
    fn test_parse_matches_constructors() {
        assert_eq!("Post".parse::<TypeRef>().unwrap(), TypeRef::named("Post"));
        assert_eq!("Post!".parse::<TypeRef>().unwrap(), TypeRef::required("Post"));
        assert_eq!("[Post]".parse::<TypeRef>().unwrap(), TypeRef::list_of("Post"));
        assert_eq!(
            " [ Post! ]! ".parse::<TypeRef>().unwrap(),
            TypeRef::required_list_of("Post")
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "!", "[Post", "Post]", "[[Post]]", "1Post", "Po st"] {
            assert!(text.parse::<TypeRef>().is_err(), "{:?} should not parse", text);
        }
    }

    #[test]
    fn test_element_non_null_requires_list() {
        let type_ref = TypeRef::new("Post", true, false, true);
        assert!(!type_ref.list_element_non_null);
        assert_eq!(type_ref.to_string(), "Post!");
    }

    #[test]
    fn test_scalar_inputs() {
        use serde_json::json;

        let title = TypeRef::required("String");
        assert!(title.accepts_input(&json!("Nexus")));
        assert!(!title.accepts_input(&json!(5)));
        assert!(!title.accepts_input(&Value::Null));

        assert!(TypeRef::named("Int").accepts_input(&Value::Null));
        assert!(!TypeRef::named("Int").accepts_input(&json!(1.5)));
        assert!(!TypeRef::named("Int").accepts_input(&json!(i64::MAX)));
        assert!(TypeRef::named("ID").accepts_input(&json!(7)));
        assert!(!TypeRef::named("Boolean").accepts_input(&json!("true")));

        let tags = TypeRef::list_of("String");
        assert!(tags.accepts_input(&json!(["a", null])));
        assert!(tags.accepts_input(&json!("a")));
        assert!(!tags.accepts_input(&json!(["a", 1])));
        assert!(!TypeRef::new("String", false, true, true).accepts_input(&json!(["a", null])));
    }

    #[test]
    fn test_names() {
        assert!(is_valid_name("createDraft"));
        assert!(is_valid_name("_private2"));
        assert!(!is_valid_name("2fast"));
        assert!(!is_valid_name("kebab-case"));
        assert!(is_builtin_scalar("ID"));
        assert!(!is_builtin_scalar("Post"));
    }
}
