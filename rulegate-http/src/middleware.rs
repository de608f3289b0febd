// Middleware chain the validation adapters plug into

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::HttpError;
use crate::http::{HttpRequest, HttpResponse};

/// Boxed future resolving to a response.
pub type ResponseFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send>>;

/// Continuation handed to a middleware; calling it runs the remainder of the
/// chain and then the terminal handler.
pub type Next = Box<dyn FnOnce(HttpRequest) -> ResponseFuture + Send>;

/// Shared terminal handler at the end of a chain.
pub type HandlerFn = Arc<dyn Fn(HttpRequest) -> ResponseFuture + Send + Sync>;

/// A processing step wrapped around request handling.
///
/// Implementations either call `next` to continue the chain or answer the
/// request themselves, as the validator middlewares do on failure.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, req: HttpRequest, next: Next) -> Result<HttpResponse, HttpError>;
}

/// An ordered middleware stack applied around a terminal handler.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    stack: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware; earlier additions run closer to the request.
    pub fn use_middleware<M: Middleware + 'static>(&mut self, middleware: M) {
        self.stack.push(Arc::new(middleware));
    }

    /// Runs `req` through every middleware and into `handler`.
    ///
    /// The stack is folded back to front into one continuation, so the `Next`
    /// each middleware receives carries everything behind it.
    pub async fn apply(
        &self,
        req: HttpRequest,
        handler: HandlerFn,
    ) -> Result<HttpResponse, HttpError> {
        debug!(
            middleware_count = self.stack.len(),
            method = %req.method,
            path = %req.path,
            "Applying middleware chain"
        );
        let mut next: Next = Box::new(move |req| {
            trace!("Middleware chain complete, calling handler");
            handler(req)
        });
        for middleware in self.stack.iter().rev() {
            let middleware = middleware.clone();
            let rest = next;
            next = Box::new(move |req| {
                Box::pin(async move { middleware.handle(req, rest).await })
            });
        }
        next(req).await
    }
}
