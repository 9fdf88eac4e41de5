//! Ordered key/value store used to hold partially known cell data.

use serde::{ser::SerializeMap, Serialize, Serializer};
use serde_json::{Map, Value};

/// A single value held by a [`FieldBag`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i32),
    Long(i64),
    Bool(bool),
    Bag(FieldBag),
}

impl FieldValue {
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Int(x) => Value::from(*x),
            FieldValue::Long(x) => Value::from(*x),
            FieldValue::Bool(x) => Value::from(*x),
            FieldValue::Bag(x) => x.to_json(),
        }
    }
}

/// Insertion ordered mapping from field name to [`FieldValue`].
///
/// Reads never fail: every getter takes the value to return when the key is
/// missing or holds a value of another kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBag {
    entries: Vec<(String, FieldValue)>,
}

impl FieldBag {
    pub fn new() -> Self {
        Self::default()
    }

    fn put(&mut self, key: &str, value: FieldValue) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key.to_owned(), value)),
        }
    }

    fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn set_int(&mut self, key: &str, value: i32) {
        self.put(key, FieldValue::Int(value));
    }

    pub fn set_long(&mut self, key: &str, value: i64) {
        self.put(key, FieldValue::Long(value));
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.put(key, FieldValue::Bool(value));
    }

    pub fn set_bag(&mut self, key: &str, value: FieldBag) {
        self.put(key, FieldValue::Bag(value));
    }

    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        match self.get(key) {
            Some(FieldValue::Int(x)) => *x,
            _ => default,
        }
    }

    pub fn get_long(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(FieldValue::Long(x)) => *x,
            _ => default,
        }
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(FieldValue::Bool(x)) => *x,
            _ => default,
        }
    }

    pub fn get_bag(&self, key: &str) -> Option<&FieldBag> {
        match self.get(key) {
            Some(FieldValue::Bag(x)) => Some(x),
            _ => None,
        }
    }

    /// Copy every entry of `other` into this bag, `other` winning on collisions.
    pub fn merge_from(&mut self, other: &FieldBag) {
        for (key, value) in &other.entries {
            self.put(key, value.clone());
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        Value::Object(map)
    }
}

// serde_json::Map sorts its keys, so serializing directly keeps insertion order
impl Serialize for FieldBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
