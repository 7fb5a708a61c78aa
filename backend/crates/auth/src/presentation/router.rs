//! Auth Router

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_session};

/// Create the auth router with the PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create an auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    let gate_state = AuthMiddlewareState {
        repo: state.repo.clone(),
        config: state.config.clone(),
    };

    // Protected routes sit behind the request gate
    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route("/logout-all", post(handlers::logout_all::<R>))
        .route_layer(middleware::from_fn(move |req: Request, next: Next| {
            let gate_state = gate_state.clone();
            async move { require_session(gate_state, req, next).await }
        }));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .merge(protected)
        .with_state(state)
}
