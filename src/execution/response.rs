//! Operation results

use crate::core::error::{FieldError, FieldErrorKind};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Result of an executed operation
///
/// `data` is `None` when a null propagated all the way up to the root, in
/// which case `errors` explains why. Otherwise `data` holds one entry per
/// top-level response key and `errors` lists every position that was nulled.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub data: Option<Value>,
    pub errors: Vec<FieldError>,
}

impl Response {
    /// Executed without any field error
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Value at a top-level response key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.as_ref()?.get(key)
    }

    pub fn errors_of_kind(&self, kind: FieldErrorKind) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |error| error.kind == kind)
    }

    /// GraphQL wire shape: `{"data": ..., "errors": [...]}`
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            "data".to_string(),
            self.data.clone().unwrap_or(Value::Null),
        );
        if !self.errors.is_empty() {
            body.insert(
                "errors".to_string(),
                Value::Array(self.errors.iter().map(FieldError::to_json).collect()),
            );
        }
        Value::Object(body)
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
