//! Auth Middleware / Request Gate
//!
//! The only place request identity is established. Protected routes sit
//! behind [`require_session`]; by the time a handler runs, `CurrentUser`
//! is guaranteed to be in the request extensions.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::cookie::extract_cookie;

use crate::application::ResolveSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::User;
use crate::domain::repository::SessionRepository;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// The authenticated user for this request, inserted by the gate.
///
/// Request-scoped: lives in the request extensions, never in process-wide
/// state. A protected handler that cannot extract it has been wired
/// without the gate, which is a bug, and axum reports it as a 500.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware that requires a valid session on the request.
///
/// - No cookie: reject 401 without touching the store.
/// - Unknown/expired token: reject 401 and instruct the client to drop
///   the cookie.
/// - Valid token: attach [`CurrentUser`] and continue.
pub async fn require_session<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let Some(token) = extract_cookie(req.headers(), &state.config.session_cookie_name) else {
        return Err(AppError::unauthorized("Missing session token").into_response());
    };

    let use_case = ResolveSessionUseCase::new(state.repo.clone());

    let user = match use_case.execute(&token).await {
        Ok(user) => user,
        Err(err @ AuthError::SessionInvalid) => {
            let clear = state.config.cookie_settings().clear_header();
            let mut response = err.into_response();
            response.headers_mut().insert(header::SET_COOKIE, clear);
            return Err(response);
        }
        Err(err) => return Err(err.into_response()),
    };

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
