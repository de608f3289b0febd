// Case-normalizing store for validated data

use crate::casing::KeyCase;
use serde_json::Value;
use std::collections::BTreeMap;

/// Read-mostly store holding the fields that survived validation.
///
/// Keys pass through the configured [`KeyCase`] on insert and on lookup:
/// with the camel convention, data stored under `some_key` is readable as
/// either `some_key` or `someKey`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataStore {
    case: KeyCase,
    items: BTreeMap<String, Value>,
}

impl DataStore {
    pub fn new(case: KeyCase) -> Self {
        Self {
            case,
            items: BTreeMap::new(),
        }
    }

    pub fn key_case(&self) -> KeyCase {
        self.case
    }

    /// Replace the stored items, normalizing every key.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = (String, Value)>) {
        self.items = items
            .into_iter()
            .map(|(key, value)| (self.case.convert(&key), value))
            .collect();
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.items.get(&self.case.convert(key))
    }

    /// Stored value for `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).cloned().unwrap_or(default)
    }

    pub fn has(&self, key: &str) -> bool {
        self.items.contains_key(&self.case.convert(key))
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.items.remove(&self.case.convert(key))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.items.iter()
    }

    /// The normalized items as stored.
    pub fn items(&self) -> &BTreeMap<String, Value> {
        &self.items
    }
}
