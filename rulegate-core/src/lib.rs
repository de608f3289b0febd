//! Rule-group validation core for Rulegate
//!
//! Validates flat data projections against named groups of pipe-separated
//! rules. A [`Validator`] selects a rule group, applies template
//! substitutions, delegates to a pluggable [`RuleEngine`], and exposes either
//! the validated data as a case-normalizing [`DataStore`] or the structured
//! failure record ([`MessageBag`] plus [`FailedRules`]).
//!
//! # Examples
//!
//! ## Basic Validation
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use rulegate_core::{PipeEngine, RuleTable, Validator};
//!
//! let rules = RuleTable::new().group("save", [
//!     ("string", "required|string"),
//!     ("int", "required|numeric|min:1|max:10"),
//! ]);
//! let mut validator = Validator::new(Arc::new(PipeEngine::new()))
//!     .with_rules(rules)
//!     .with_group("save");
//!
//! let input = json!({"string": "string", "int": 10}).as_object().cloned().unwrap();
//! assert_eq!(validator.validate(&input).unwrap(), true);
//! assert_eq!(validator.item("int").unwrap(), &json!(10));
//! ```
//!
//! ## Failure Reporting
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use rulegate_core::{PipeEngine, RuleTable, Validator};
//!
//! let rules = RuleTable::new().group("save", [("int", "required|numeric|min:1|max:10")]);
//! let mut validator = Validator::new(Arc::new(PipeEngine::new()))
//!     .with_rules(rules)
//!     .with_group("save");
//!
//! let input = json!({"int": 100}).as_object().cloned().unwrap();
//! assert_eq!(validator.validate(&input).unwrap(), false);
//! assert_eq!(validator.messages().first("int"), Some("int must be at most 10"));
//!
//! let failed = validator.failed_rules().get("int").unwrap();
//! assert_eq!(failed.get("Max"), Some(&vec!["10".to_string()]));
//! ```
//!
//! ## Rule Templates
//!
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use rulegate_core::{PipeEngine, RuleTable, Validator};
//!
//! let rules = RuleTable::new().group("save", [("int", "required|min:{min}|max:{max}|numeric")]);
//! let mut validator = Validator::new(Arc::new(PipeEngine::new()))
//!     .with_rules(rules)
//!     .with_group("save");
//! validator.add_template_replacements(&[("min", 1), ("max", 10)]);
//!
//! let input = json!({"int": 5}).as_object().cloned().unwrap();
//! assert_eq!(validator.validate(&input).unwrap(), true);
//! ```

mod casing;
mod checks;
mod engine;
mod errors;
mod messages;
mod rules;
mod storage;
mod template;
mod validator;

pub use casing::*;
pub use checks::*;
pub use engine::*;
pub use errors::*;
pub use messages::*;
pub use rules::*;
pub use storage::*;
pub use template::*;
pub use validator::*;
