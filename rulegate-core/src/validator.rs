// Validation orchestrator and object-source adapters

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::casing::KeyCase;
use crate::engine::{DataMap, RuleEngine};
use crate::errors::ValidatorError;
use crate::messages::{FailedRules, MessageBag};
use crate::rules::{RuleSet, RuleTable};
use crate::storage::DataStore;
use crate::template::TemplateMap;

/// An object that can be validated: a flat data projection plus an optional
/// group hint.
pub trait ValidationSource {
    /// The flat key to value projection to validate.
    fn data(&self) -> DataMap;

    /// The rule group this object selects, if it carries one. An explicit
    /// group set on the validator takes precedence.
    fn group(&self) -> Option<String> {
        None
    }
}

impl ValidationSource for DataMap {
    fn data(&self) -> DataMap {
        self.clone()
    }
}

/// A record projection built from a persisted row: its attribute map plus an
/// optional state that doubles as the rule group (say `"new"` vs
/// `"existing"`).
#[derive(Debug, Clone, Default)]
pub struct RecordSource {
    attributes: DataMap,
    state: Option<String>,
}

impl RecordSource {
    pub fn new(attributes: DataMap) -> Self {
        Self {
            attributes,
            state: None,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

impl ValidationSource for RecordSource {
    fn data(&self) -> DataMap {
        self.attributes.clone()
    }

    fn group(&self) -> Option<String> {
        self.state.clone()
    }
}

type Predicate = Box<dyn Fn(&DataMap) -> bool + Send + Sync>;

struct ConditionalRule {
    field: String,
    rules: String,
    condition: Predicate,
}

/// The input of one run; kept to answer repeat runs from cache.
#[derive(PartialEq)]
struct RunKey {
    data: DataMap,
    group: Option<String>,
}

/// Validation orchestrator.
///
/// Owns a rule table, an injected engine, and the outcome of the last run.
/// One instance serves one validation lifecycle at a time; create a fresh
/// instance per request when validating concurrently.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use serde_json::json;
/// use rulegate_core::{PipeEngine, RuleTable, Validator};
///
/// let mut validator = Validator::new(Arc::new(PipeEngine::new()))
///     .with_rules(RuleTable::new().group("save", [("int", "required|numeric|min:1|max:10")]))
///     .with_group("save");
///
/// let data = json!({"int": 5}).as_object().cloned().unwrap();
/// assert_eq!(validator.validate(&data).unwrap(), true);
/// assert_eq!(validator.item("int").unwrap(), &json!(5));
/// ```
pub struct Validator {
    engine: Arc<dyn RuleEngine>,
    rules: RuleTable,
    group: Option<String>,
    templates: TemplateMap,
    conditionals: Vec<ConditionalRule>,
    key_case: KeyCase,
    state: Option<bool>,
    last_run: Option<RunKey>,
    storage: Option<DataStore>,
    messages: MessageBag,
    failed: FailedRules,
}

impl Validator {
    /// Creates a validator around an injected engine with no rules, no group
    /// override, and camelCase data-store keys.
    pub fn new(engine: Arc<dyn RuleEngine>) -> Self {
        Self {
            engine,
            rules: RuleTable::new(),
            group: None,
            templates: TemplateMap::new(),
            conditionals: Vec::new(),
            key_case: KeyCase::default(),
            state: None,
            last_run: None,
            storage: None,
            messages: MessageBag::new(),
            failed: FailedRules::new(),
        }
    }

    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_key_case(mut self, case: KeyCase) -> Self {
        self.key_case = case;
        self
    }

    /// Replaces the rule table and invalidates the run cache.
    pub fn set_rules(&mut self, rules: RuleTable) {
        self.rules = rules;
        self.last_run = None;
    }

    /// Sets or clears the explicit group override and invalidates the run
    /// cache. `None` falls back to the group the source reports.
    pub fn set_group(&mut self, group: Option<String>) {
        self.group = group;
        self.last_run = None;
    }

    /// Merges placeholder substitutions applied to every rule string, e.g.
    /// `{min}` in `"min:{min}"`. Replacements accumulate across calls and
    /// invalidate the run cache.
    pub fn add_template_replacements<V: fmt::Display>(&mut self, replacements: &[(&str, V)]) {
        for (name, value) in replacements {
            self.templates.add(name, value);
        }
        self.last_run = None;
    }

    /// Registers a conditional rule: when `condition` holds over the
    /// extracted data at validate time, `rules` is appended (pipe-joined) to
    /// the field's effective rules.
    pub fn sometimes(
        &mut self,
        field: impl Into<String>,
        rules: impl Into<String>,
        condition: impl Fn(&DataMap) -> bool + Send + Sync + 'static,
    ) {
        self.conditionals.push(ConditionalRule {
            field: field.into(),
            rules: rules.into(),
            condition: Box::new(condition),
        });
        self.last_run = None;
    }

    /// Validates `source` against the active rule group.
    ///
    /// Returns `Ok(true)` when every rule passes; the validated data is then
    /// available through [`data`](Self::data) and the item accessors, reduced
    /// to the fields the rule set covers. Returns `Ok(false)` when a rule
    /// fails; the failure is available through [`messages`](Self::messages)
    /// and [`failed_rules`](Self::failed_rules). Errors on an unknown group
    /// or a malformed rule, independent of the data.
    ///
    /// Repeating the call with the same extracted data and group, with no
    /// intervening rule, group, or template change, answers from cache
    /// without re-running the engine.
    pub fn validate(&mut self, source: &dyn ValidationSource) -> Result<bool, ValidatorError> {
        let run = RunKey {
            data: source.data(),
            group: self.group.clone().or_else(|| source.group()),
        };
        if self.last_run.as_ref() == Some(&run) {
            if let Some(state) = self.state {
                trace!(passed = state, "Validation state answered from cache");
                return Ok(state);
            }
        }

        let effective = self.effective_rules(&run)?;
        let report = self.engine.evaluate(&run.data, &effective)?;

        if report.passed() {
            let mut covered = DataMap::new();
            for (key, value) in &run.data {
                if effective.contains_key(key) {
                    covered.insert(key.clone(), value.clone());
                }
            }
            let mut store = DataStore::new(self.key_case);
            store.set_items(covered);
            debug!(
                group = run.group.as_deref().unwrap_or("<all>"),
                items = store.len(),
                "Validation passed"
            );
            self.storage = Some(store);
            self.messages = MessageBag::new();
            self.failed = FailedRules::new();
            self.state = Some(true);
        } else {
            debug!(
                group = run.group.as_deref().unwrap_or("<all>"),
                failures = report.messages.len(),
                "Validation failed"
            );
            self.storage = None;
            self.messages = report.messages;
            self.failed = report.failed;
            self.state = Some(false);
        }
        self.last_run = Some(run);
        Ok(self.state == Some(true))
    }

    /// Requires a passing validation: runs [`validate`](Self::validate) if
    /// this instance never ran, then errors with the failure messages unless
    /// the outcome is a pass.
    pub fn assert_valid(&mut self, source: &dyn ValidationSource) -> Result<(), ValidatorError> {
        if self.state.is_none() {
            self.validate(source)?;
        }
        match self.state {
            Some(true) => Ok(()),
            _ => Err(ValidatorError::NotSatisfied(self.messages.clone())),
        }
    }

    /// The tri-state outcome: `None` before any run, then `Some(passed)`.
    pub fn passed(&self) -> Option<bool> {
        self.state
    }

    /// Failure messages from the last run; empty unless the last run failed.
    pub fn messages(&self) -> &MessageBag {
        &self.messages
    }

    /// Failed rule records from the last run; empty unless the last run
    /// failed.
    pub fn failed_rules(&self) -> &FailedRules {
        &self.failed
    }

    /// The validated data store. Fails with
    /// [`StateUnavailable`](ValidatorError::StateUnavailable) before any run
    /// or after a failed run.
    pub fn data(&self) -> Result<&DataStore, ValidatorError> {
        let reason = match self.state {
            None => "validation has not run",
            Some(false) => "the last validation failed",
            Some(true) => match &self.storage {
                Some(store) => return Ok(store),
                None => "the last validation failed",
            },
        };
        Err(ValidatorError::StateUnavailable(reason))
    }

    /// A single validated value by key, case-normalized. Fails with
    /// [`MissingKey`](ValidatorError::MissingKey) when the key is not among
    /// the validated fields.
    pub fn item(&self, key: &str) -> Result<&Value, ValidatorError> {
        self.data()?
            .get(key)
            .ok_or_else(|| ValidatorError::MissingKey(key.to_string()))
    }

    /// A single validated value by key, or `default` when the key is not
    /// among the validated fields.
    pub fn item_or(&self, key: &str, default: Value) -> Result<Value, ValidatorError> {
        Ok(self.data()?.get_or(key, default))
    }

    fn effective_rules(&self, run: &RunKey) -> Result<RuleSet, ValidatorError> {
        let mut effective = self.rules.select(run.group.as_deref())?;
        for conditional in &self.conditionals {
            if (conditional.condition)(&run.data) {
                let entry = effective.entry(conditional.field.clone()).or_default();
                if entry.is_empty() {
                    *entry = conditional.rules.clone();
                } else {
                    entry.push('|');
                    entry.push_str(&conditional.rules);
                }
            }
        }
        Ok(self.templates.apply_all(&effective))
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.rules)
            .field("group", &self.group)
            .field("templates", &self.templates)
            .field("conditionals", &self.conditionals.len())
            .field("key_case", &self.key_case)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
