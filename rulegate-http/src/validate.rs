// Validator middlewares for API and web request handling

use async_trait::async_trait;
use rulegate_core::{FailedRules, Validator};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::HttpError;
use crate::flash::flash_errors;
use crate::http::{HttpRequest, HttpResponse};
use crate::middleware::{Middleware, Next};
use crate::source::RequestSource;

/// Builds a fresh validator per request. One validator serves one
/// validation lifecycle, so middlewares never share instances across
/// requests.
pub type ValidatorFactory = Arc<dyn Fn() -> Validator + Send + Sync>;

/// How a middleware picks the rule group for a request.
#[derive(Clone)]
pub enum GroupSelect {
    /// Every request validates against the same group.
    Fixed(String),
    /// The group is derived from the request.
    FromRequest(Arc<dyn Fn(&HttpRequest) -> Option<String> + Send + Sync>),
}

impl GroupSelect {
    pub fn fixed(name: impl Into<String>) -> Self {
        Self::Fixed(name.into())
    }

    pub fn from_request(
        select: impl Fn(&HttpRequest) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self::FromRequest(Arc::new(select))
    }

    fn resolve(&self, request: &HttpRequest) -> Option<String> {
        match self {
            Self::Fixed(name) => Some(name.clone()),
            Self::FromRequest(select) => select(request),
        }
    }
}

#[derive(Serialize)]
struct ValidationErrorBody<'a> {
    #[serde(rename = "validationErrors")]
    validation_errors: &'a FailedRules,
}

/// Validates API requests; failures answer with a JSON error body.
///
/// On failure the response status is 422 (configurable) and the body is
/// `{"validationErrors":{field:{Rule:[params...]}}}`. Valid requests pass
/// through to the next handler untouched.
pub struct ApiValidatorMiddleware {
    factory: ValidatorFactory,
    group: GroupSelect,
    failure_status: u16,
}

impl ApiValidatorMiddleware {
    pub fn new(factory: impl Fn() -> Validator + Send + Sync + 'static, group: GroupSelect) -> Self {
        Self {
            factory: Arc::new(factory),
            group,
            failure_status: 422,
        }
    }

    pub fn with_failure_status(mut self, status: u16) -> Self {
        self.failure_status = status;
        self
    }
}

#[async_trait]
impl Middleware for ApiValidatorMiddleware {
    async fn handle(&self, req: HttpRequest, next: Next) -> Result<HttpResponse, HttpError> {
        let mut source = RequestSource::from_request(&req)?;
        if let Some(group) = self.group.resolve(&req) {
            source = source.with_group(group);
        }

        let mut validator = (self.factory)();
        if validator.validate(&source)? {
            trace!(path = %req.path, "Request validation passed");
            return next(req).await;
        }

        debug!(
            path = %req.path,
            status = self.failure_status,
            "Request validation failed"
        );
        HttpResponse::new(self.failure_status).with_json(&ValidationErrorBody {
            validation_errors: validator.failed_rules(),
        })
    }
}

/// Validates web requests; failures redirect back with flashed messages.
///
/// Each group maps to a redirect destination. On failure the middleware
/// emits a 302 to the group's destination and attaches the failure messages
/// as a flash cookie that [`take_errors`](crate::take_errors) reads back on
/// the next request. A failing group with no configured destination is a
/// programmer error.
pub struct WebValidatorMiddleware {
    factory: ValidatorFactory,
    group: GroupSelect,
    redirects: HashMap<String, String>,
}

impl WebValidatorMiddleware {
    pub fn new(factory: impl Fn() -> Validator + Send + Sync + 'static, group: GroupSelect) -> Self {
        Self {
            factory: Arc::new(factory),
            group,
            redirects: HashMap::new(),
        }
    }

    /// Maps a rule group to the destination of its failure redirect.
    pub fn redirect(mut self, group: impl Into<String>, destination: impl Into<String>) -> Self {
        self.redirects.insert(group.into(), destination.into());
        self
    }
}

#[async_trait]
impl Middleware for WebValidatorMiddleware {
    async fn handle(&self, req: HttpRequest, next: Next) -> Result<HttpResponse, HttpError> {
        let group = self.group.resolve(&req);
        let mut source = RequestSource::from_request(&req)?;
        if let Some(name) = &group {
            source = source.with_group(name.clone());
        }

        let mut validator = (self.factory)();
        if validator.validate(&source)? {
            trace!(path = %req.path, "Request validation passed");
            return next(req).await;
        }

        let destination = group
            .as_deref()
            .and_then(|name| self.redirects.get(name))
            .ok_or_else(|| {
                HttpError::MissingRedirect(group.clone().unwrap_or_else(|| "<default>".to_string()))
            })?;

        debug!(
            path = %req.path,
            destination = %destination,
            "Request validation failed, redirecting"
        );
        flash_errors(HttpResponse::redirect(destination), validator.messages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_select_fixed() {
        let select = GroupSelect::fixed("save");
        let req = HttpRequest::new("POST", "/items");
        assert_eq!(select.resolve(&req), Some("save".to_string()));
    }

    #[test]
    fn test_group_select_from_request() {
        let select = GroupSelect::from_request(|req: &HttpRequest| {
            if req.method == "POST" {
                Some("create".to_string())
            } else {
                None
            }
        });

        let post = HttpRequest::new("POST", "/items");
        assert_eq!(select.resolve(&post), Some("create".to_string()));

        let get = HttpRequest::new("GET", "/items");
        assert_eq!(select.resolve(&get), None);
    }
}
