//! Ordered field → value mapping describing a partial update.

use crate::error::{PatchError, PatchResult};
use crate::value::Value;
use serde::{Deserialize, Deserializer};

/// The fields to change, in the order their placeholders will be numbered.
///
/// Field names are unique: setting a field twice replaces the value but keeps
/// the field's original position.
///
/// # Example
/// ```ignore
/// use pgpatch::UpdateData;
///
/// let data = UpdateData::new().set("firstName", "Aliya").set("age", 32);
/// assert_eq!(data.fields().collect::<Vec<_>>(), ["firstName", "age"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateData {
    entries: Vec<(String, Value)>,
}

impl UpdateData {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field (builder style).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field only when `value` is `Some`.
    pub fn set_opt<T: Into<Value>>(self, field: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(field, v),
            None => self,
        }
    }

    /// Set a field, returning the previous value if it was already present.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((field, value));
                None
            }
        }
    }

    /// Remove a field, returning its value. Later fields move up one position.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|(f, _)| f == field)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), v))
    }

    /// Build from a JSON request body. The body must be an object; key order is kept.
    pub fn from_json(body: serde_json::Value) -> PatchResult<Self> {
        match body {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(PatchError::invalid_argument(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for UpdateData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (k, v) in iter {
            data.insert(k, v);
        }
        data
    }
}

impl TryFrom<serde_json::Value> for UpdateData {
    type Error = PatchError;

    fn try_from(body: serde_json::Value) -> PatchResult<Self> {
        Self::from_json(body)
    }
}

impl<'de> Deserialize<'de> for UpdateData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // `serde_json::Map` is insertion-ordered (`preserve_order`).
        let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(map.into_iter().collect())
    }
}
