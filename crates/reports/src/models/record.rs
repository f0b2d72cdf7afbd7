//! Report rows and their dimension identity

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One normalized report row: grouping dimensions plus measured metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub dimensions: Map<String, Value>,
    #[serde(default)]
    pub metrics: Map<String, Value>,
}

impl Record {
    pub fn new(dimensions: Map<String, Value>, metrics: Map<String, Value>) -> Self {
        Self {
            dimensions,
            metrics,
        }
    }

    /// Parse a raw `{dimensions, metrics}` row from a report response
    pub fn from_row(row: Value) -> Result<Self> {
        serde_json::from_value(row).context("Report row is not a {dimensions, metrics} object")
    }

    /// Extract the dimension key for the given ordered dimension names
    pub fn key(&self, names: &[String]) -> DimensionKey {
        DimensionKey::from_dimensions(names, &self.dimensions)
    }

    /// Look up a field in dimensions first, then metrics
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.dimensions.get(name).or_else(|| self.metrics.get(name))
    }

    /// Flatten into one object; dimension values win over same-named metrics
    pub fn flatten(self) -> Map<String, Value> {
        let mut out = self.metrics;
        out.extend(self.dimensions);
        out
    }
}

/// A typed dimension value usable as part of a hash key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    Missing,
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    /// Floats and nested values, compared by their JSON rendering
    Json(String),
}

impl From<Option<&Value>> for KeyValue {
    fn from(value: Option<&Value>) -> Self {
        match value {
            None => KeyValue::Missing,
            Some(Value::Null) => KeyValue::Null,
            Some(Value::Bool(b)) => KeyValue::Bool(*b),
            Some(Value::String(s)) => KeyValue::Text(s.clone()),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => KeyValue::Int(i),
                None => KeyValue::Json(n.to_string()),
            },
            Some(other) => KeyValue::Json(other.to_string()),
        }
    }
}

/// Ordered, named dimension values identifying one logical report entity/date
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimensionKey(Vec<(String, KeyValue)>);

impl DimensionKey {
    pub fn from_dimensions(names: &[String], dimensions: &Map<String, Value>) -> Self {
        Self(
            names
                .iter()
                .map(|name| (name.clone(), KeyValue::from(dimensions.get(name))))
                .collect(),
        )
    }

    #[cfg(test)]
    pub fn parts(&self) -> &[(String, KeyValue)] {
        &self.0
    }
}
