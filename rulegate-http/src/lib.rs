//! HTTP middleware adapters for Rulegate validation
//!
//! Wires [`rulegate_core`] validators into an HTTP middleware chain. Each
//! middleware extracts the request payload (query parameters merged with a
//! JSON or form body), validates it against a rule group, and either passes
//! the request through or answers for it: the API middleware with a JSON
//! error body, the web middleware with a redirect carrying flashed messages.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use rulegate_core::{PipeEngine, RuleTable, Validator};
//! use rulegate_http::{ApiValidatorMiddleware, GroupSelect, MiddlewareChain};
//!
//! let rules = RuleTable::new().group("save", [("int", "required|numeric|min:1|max:10")]);
//! let factory = move || Validator::new(Arc::new(PipeEngine::new())).with_rules(rules.clone());
//!
//! let mut chain = MiddlewareChain::new();
//! chain.use_middleware(ApiValidatorMiddleware::new(factory, GroupSelect::fixed("save")));
//! ```

mod error;
mod flash;
mod http;
mod middleware;
mod source;
mod validate;

pub use error::*;
pub use flash::*;
pub use http::*;
pub use middleware::*;
pub use source::*;
pub use validate::*;
