// Rule template substitution

use crate::rules::RuleSet;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Placeholder substitutions applied to every rule string before evaluation.
///
/// Tokens are stored in braced form: `add("min", 1)` registers `{min}`. The
/// map accumulates across calls and is never reset by a validation run, so
/// parameterized rules keep working on re-validation. Token order is
/// deterministic (sorted) on every application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateMap {
    entries: BTreeMap<String, String>,
}

impl TemplateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a placeholder; `name` is given without braces.
    pub fn add(&mut self, name: &str, value: impl Display) -> &mut Self {
        self.entries.insert(format!("{{{name}}}"), value.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Replace every occurrence of every registered token in `rule`.
    pub fn apply(&self, rule: &str) -> String {
        let mut out = rule.to_string();
        for (token, value) in &self.entries {
            out = out.replace(token, value);
        }
        out
    }

    /// Apply substitutions to every rule string of a rule set.
    pub fn apply_all(&self, rules: &RuleSet) -> RuleSet {
        rules
            .iter()
            .map(|(field, rule)| (field.clone(), self.apply(rule)))
            .collect()
    }
}
