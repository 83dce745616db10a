//! Global request interceptors.
//!
//! An [`InterceptorChain`] is an ordered list of [`Interceptor`]s installed
//! once on the whole router. Each one sees the request before routing and
//! either lets it through or answers it directly.

pub mod request_log;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

pub use request_log::RequestLogger;

/// Outcome of one interceptor.
pub enum Flow {
    Continue,
    Respond(Response),
}

pub trait Interceptor: Send + Sync {
    fn name(&self) -> &'static str;

    fn intercept(&self, req: &Request) -> Flow;
}

#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor; chain order is call order.
    pub fn with<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run interceptors in order; the first `Respond` wins.
    pub fn evaluate(&self, req: &Request) -> Flow {
        for interceptor in &self.interceptors {
            if let Flow::Respond(resp) = interceptor.intercept(req) {
                debug!(interceptor = interceptor.name(), path = %req.uri().path(), "request short-circuited");
                return Flow::Respond(resp);
            }
        }
        Flow::Continue
    }
}

/// Middleware: run the chain, then hand the request to the router.
pub async fn run_chain(State(chain): State<InterceptorChain>, req: Request, next: Next) -> Response {
    match chain.evaluate(&req) {
        Flow::Respond(resp) => resp,
        Flow::Continue => next.run(req).await,
    }
}

/// Chain installed on every route.
pub fn default_chain() -> InterceptorChain {
    InterceptorChain::new().with(RequestLogger::stdout())
}
