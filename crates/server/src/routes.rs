pub mod users;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use service::storage::UserStore;

use crate::middleware::{run_chain, InterceptorChain};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
}

impl AppState {
    pub fn new(users: Arc<UserStore>) -> Self {
        Self { users }
    }
}

/// Build the application router: user CRUD routes behind the interceptor chain.
///
/// The chain is the outermost layer, so it sees every request, including
/// ones no route matches.
pub fn build_router(state: AppState, chain: InterceptorChain) -> Router {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(state)
        .layer(
            // Spans stay at DEBUG so the default filter leaves one stdout line per request.
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
        .layer(middleware::from_fn_with_state(chain, run_chain))
}
