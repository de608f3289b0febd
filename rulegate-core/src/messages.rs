// Failure messages and failed-rule metadata

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const NO_MESSAGES: &[String] = &[];

/// Failure messages keyed by field.
///
/// BTreeMap-backed so iteration and serialization are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageBag {
    messages: BTreeMap<String, Vec<String>>,
}

impl MessageBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message for a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.messages
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// First message recorded for a field, if any.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.messages
            .get(field)
            .and_then(|m| m.first())
            .map(String::as_str)
    }

    /// All messages recorded for a field.
    pub fn get(&self, field: &str) -> &[String] {
        self.messages.get(field).map_or(NO_MESSAGES, Vec::as_slice)
    }

    pub fn has(&self, field: &str) -> bool {
        self.messages.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.messages
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Total number of messages across all fields.
    pub fn len(&self) -> usize {
        self.messages.values().map(Vec::len).sum()
    }

    pub fn merge(&mut self, other: MessageBag) {
        for (field, messages) in other.messages {
            self.messages.entry(field).or_default().extend(messages);
        }
    }
}

impl fmt::Display for MessageBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for messages in self.messages.values() {
            for message in messages {
                if !first {
                    writeln!(f)?;
                }
                write!(f, "{message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Failed-rule metadata: field name to StudlyCase rule name to the rule's
/// raw parameters.
///
/// Serializes to the wire shape `{"int":{"Min":["1"]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailedRules {
    rules: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl FailedRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed rule for a field.
    pub fn add(&mut self, field: impl Into<String>, rule: impl Into<String>, params: Vec<String>) {
        self.rules
            .entry(field.into())
            .or_default()
            .insert(rule.into(), params);
    }

    /// Rules that failed for a field.
    pub fn get(&self, field: &str) -> Option<&BTreeMap<String, Vec<String>>> {
        self.rules.get(field)
    }

    pub fn has(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Vec<String>>)> {
        self.rules.iter().map(|(field, rules)| (field.as_str(), rules))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of fields with at least one failed rule.
    pub fn len(&self) -> usize {
        self.rules.len()
    }
}
