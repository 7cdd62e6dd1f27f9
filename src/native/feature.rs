//! Feature attribute access for compiled filters and label functions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Read-only attribute lookup by name.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<&Value>;
}

impl AttributeSource for Map<String, Value> {
    fn attribute(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl AttributeSource for HashMap<String, Value> {
    fn attribute(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// A map feature as the engine hands it to style functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(properties: Map<String, Value>) -> Self {
        Self {
            id: None,
            properties,
        }
    }

    /// Build from a JSON object; any other value yields an empty feature.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(properties) => Self::new(properties),
            _ => Self::default(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(name.into(), value.into());
    }
}

impl AttributeSource for Feature {
    fn attribute(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}
