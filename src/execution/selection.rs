//! Requested field selections

use crate::core::arguments::Arguments;
use serde_json::Value;

/// One requested field with its arguments and sub-selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSelection {
    pub name: String,
    pub alias: Option<String>,
    pub arguments: Arguments,
    pub selection: Vec<FieldSelection>,
}

impl FieldSelection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name, value.into());
        self
    }

    pub fn arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn select(mut self, child: FieldSelection) -> Self {
        self.selection.push(child);
        self
    }

    /// Select plain fields by name
    pub fn fields(mut self, names: &[&str]) -> Self {
        self.selection
            .extend(names.iter().map(|name| FieldSelection::new(*name)));
        self
    }

    /// Key under which the value appears in the response
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Shorthand for a list of plain leaf selections
pub fn leaf_fields(names: &[&str]) -> Vec<FieldSelection> {
    names.iter().map(|name| FieldSelection::new(*name)).collect()
}
