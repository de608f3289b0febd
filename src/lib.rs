// Rulegate - Rule-group validation for objects and HTTP requests
//
// This library validates flat data projections against named groups of
// pipe-separated rules and, behind the `http` feature, wires validators
// into an HTTP middleware chain.

// Re-export core functionality
pub use rulegate_core::*;

// Re-export optional crates
#[cfg(feature = "http")]
pub use rulegate_http;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        DataMap,
        DataStore,
        EngineReport,
        FailedRules,
        KeyCase,
        MessageBag,
        PipeEngine,
        RecordSource,
        RuleEngine,
        RuleSet,
        RuleTable,
        TemplateMap,
        ValidationSource,
        Validator,
        ValidatorError,
    };

    #[cfg(feature = "http")]
    pub use rulegate_http::{
        ApiValidatorMiddleware,
        GroupSelect,
        HandlerFn,
        HttpError,
        HttpRequest,
        HttpResponse,
        Middleware,
        MiddlewareChain,
        Next,
        RequestSource,
        ResponseFuture,
        WebValidatorMiddleware,
        take_errors,
    };
}
