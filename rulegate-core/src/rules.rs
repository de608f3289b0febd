// Rule table and rule grammar

use std::collections::BTreeMap;

use crate::casing;
use crate::checks::Check;
use crate::errors::{EngineError, ValidatorError};

/// Field name to rule spec, e.g. `"int" => "required|numeric|min:1|max:10"`.
pub type RuleSet = BTreeMap<String, String>;

/// Sentinel group name that always selects an empty rule set, even when no
/// group by that name is defined.
pub const EMPTY_GROUP: &str = "empty";

/// Named groups of field rules.
///
/// A validator owns one table and picks a group per run; selecting no group
/// merges every group into one rule set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleTable {
    groups: BTreeMap<String, RuleSet>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    /// Adds a named group of field rules.
    pub fn group<K, V>(mut self, name: impl Into<String>, rules: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let set = rules
            .into_iter()
            .map(|(field, spec)| (field.into(), spec.into()))
            .collect();
        self.groups.insert(name.into(), set);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Resolves the rule set for a run.
    ///
    /// A named group returns its rules; the `"empty"` sentinel falls back to
    /// no rules when such a group is not defined; any other unknown name is
    /// an error. With no group every group is merged in name order, later
    /// groups overriding earlier ones per field.
    pub fn select(&self, group: Option<&str>) -> Result<RuleSet, ValidatorError> {
        match group {
            Some(name) => {
                if let Some(set) = self.groups.get(name) {
                    return Ok(set.clone());
                }
                if name == EMPTY_GROUP {
                    return Ok(RuleSet::new());
                }
                Err(ValidatorError::UnknownGroup(name.to_string()))
            }
            None => {
                let mut merged = RuleSet::new();
                for set in self.groups.values() {
                    for (field, spec) in set {
                        merged.insert(field.clone(), spec.clone());
                    }
                }
                Ok(merged)
            }
        }
    }
}

/// A parsed rule spec for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSpec {
    segments: Vec<Segment>,
    numeric: bool,
}

impl RuleSpec {
    /// Parses a pipe-separated spec such as `"required|numeric|min:1"`.
    /// Empty segments are skipped.
    pub fn parse(spec: &str) -> Result<Self, EngineError> {
        let mut segments = Vec::new();
        for part in spec.split('|') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            segments.push(Segment::parse(part)?);
        }
        let numeric = segments
            .iter()
            .any(|segment| matches!(segment.check, Check::Numeric | Check::Integer));
        Ok(Self { segments, numeric })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_required(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment.check, Check::Required))
    }

    /// Whether the spec declares the field numeric, switching size checks on
    /// strings to value comparison.
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }
}

/// One segment of a rule spec: a rule name, its parameters, and whether it
/// applies element-wise (`[]` suffix).
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    name: String,
    check: Check,
    params: Vec<String>,
    each: bool,
}

impl Segment {
    fn parse(part: &str) -> Result<Self, EngineError> {
        let (body, each) = match part.strip_suffix("[]") {
            Some(body) => (body, true),
            None => (part, false),
        };
        let (name, params) = match body.split_once(':') {
            Some((name, raw)) => {
                let params = raw.split(',').map(|p| p.trim().to_string()).collect();
                (name.trim(), params)
            }
            None => (body.trim(), Vec::new()),
        };
        let check = build_check(name, &params)?;
        Ok(Self {
            name: name.to_string(),
            check,
            params,
            each,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self) -> &Check {
        &self.check
    }

    /// Raw parameters as written in the spec.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Whether the check applies to each element of an array value.
    pub fn each(&self) -> bool {
        self.each
    }

    /// The rule name in StudlyCase, as recorded in failure reports.
    pub fn report_name(&self) -> String {
        casing::studly(&self.name)
    }
}

fn build_check(name: &str, params: &[String]) -> Result<Check, EngineError> {
    let check = match name {
        "required" => Check::Required,
        "string" => Check::StringType,
        "numeric" => Check::Numeric,
        "integer" => Check::Integer,
        "boolean" => Check::Boolean,
        "array" => Check::ArrayType,
        "email" => Check::Email,
        "url" => Check::Url,
        "uuid" => Check::Uuid,
        "alpha" => Check::Alpha,
        "alpha_num" => Check::AlphaNum,
        "min" => Check::Min(numeric_param(name, params, 0)?),
        "max" => Check::Max(numeric_param(name, params, 0)?),
        "between" => Check::Between(
            numeric_param(name, params, 0)?,
            numeric_param(name, params, 1)?,
        ),
        "in" => Check::In(listed_params(name, params)?),
        "not_in" => Check::NotIn(listed_params(name, params)?),
        _ => return Err(EngineError::UnknownRule(name.to_string())),
    };
    Ok(check)
}

fn numeric_param(rule: &str, params: &[String], index: usize) -> Result<f64, EngineError> {
    let raw = params.get(index).ok_or_else(|| EngineError::InvalidParameters {
        rule: rule.to_string(),
        detail: format!("missing parameter {}", index + 1),
    })?;
    raw.parse().map_err(|_| EngineError::InvalidParameters {
        rule: rule.to_string(),
        detail: format!("parameter {} is not a number: '{raw}'", index + 1),
    })
}

fn listed_params(rule: &str, params: &[String]) -> Result<Vec<String>, EngineError> {
    if params.is_empty() {
        return Err(EngineError::InvalidParameters {
            rule: rule.to_string(),
            detail: "expects at least one parameter".to_string(),
        });
    }
    Ok(params.to_vec())
}
