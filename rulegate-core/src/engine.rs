// Rule engine trait and the built-in implementation

use serde_json::Value;
use tracing::trace;

use crate::checks::{self, Check};
use crate::errors::EngineError;
use crate::messages::{FailedRules, MessageBag};
use crate::rules::{RuleSet, RuleSpec, Segment};

/// Field name to value, as extracted from a validation source.
pub type DataMap = serde_json::Map<String, Value>;

/// The outcome of one engine run: human-readable messages plus the failed
/// rule records keyed by field and StudlyCase rule name.
#[derive(Debug, Clone, Default)]
pub struct EngineReport {
    pub messages: MessageBag,
    pub failed: FailedRules,
}

impl EngineReport {
    /// Whether the run recorded no failure of either kind.
    pub fn passed(&self) -> bool {
        self.messages.is_empty() && self.failed.is_empty()
    }
}

/// Evaluates a rule set against extracted data.
///
/// The validator owns a boxed engine so callers can substitute their own,
/// for instance to count runs or stub outcomes in tests.
pub trait RuleEngine: Send + Sync {
    fn evaluate(&self, data: &DataMap, rules: &RuleSet) -> Result<EngineReport, EngineError>;
}

/// The built-in engine: parses each field's pipe-separated spec and applies
/// the segments in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeEngine;

impl PipeEngine {
    pub fn new() -> Self {
        Self
    }
}

impl RuleEngine for PipeEngine {
    fn evaluate(&self, data: &DataMap, rules: &RuleSet) -> Result<EngineReport, EngineError> {
        let mut report = EngineReport::default();
        for (field, spec) in rules {
            let spec = RuleSpec::parse(spec)?;
            let value = data.get(field);
            if !checks::is_present(value) {
                // Missing values only fail `required`; other checks are
                // skipped so optional fields stay optional.
                if spec.has_required() {
                    report.messages.add(field, Check::Required.message(field));
                    report.failed.add(field, "Required", Vec::new());
                }
                continue;
            }
            let Some(value) = value else { continue };
            for segment in spec.segments() {
                if matches!(segment.check(), Check::Required) {
                    continue;
                }
                apply_segment(field, segment, value, spec.is_numeric(), &mut report);
            }
        }
        trace!(
            fields = rules.len(),
            failed_fields = report.failed.len(),
            "Rule set evaluated"
        );
        Ok(report)
    }
}

fn apply_segment(
    field: &str,
    segment: &Segment,
    value: &Value,
    numeric: bool,
    report: &mut EngineReport,
) {
    if segment.each() {
        match value.as_array() {
            Some(items) => {
                if items.iter().any(|item| !segment.check().passes(item, numeric)) {
                    record_failure(field, segment, report);
                }
            }
            None => {
                // An element-wise check on a non-array fails as an array
                // shape violation rather than as the inner rule.
                report.messages.add(field, Check::ArrayType.message(field));
                report.failed.add(field, "Array", Vec::new());
            }
        }
        return;
    }
    if !segment.check().passes(value, numeric) {
        record_failure(field, segment, report);
    }
}

fn record_failure(field: &str, segment: &Segment, report: &mut EngineReport) {
    report.messages.add(field, segment.check().message(field));
    report
        .failed
        .add(field, segment.report_name(), segment.params().to_vec());
}
