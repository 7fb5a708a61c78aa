//! HTTP Handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;

use platform::cookie::extract_cookie;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthResponse, LoginRequest, MessageResponse, PASSWORD_MIN_LENGTH, RegisterRequest,
    UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// A body that fails to decode is a validation failure (400), not axum's
/// default 422
fn invalid_body(rejection: JsonRejection) -> AuthError {
    AuthError::Validation(format!("Invalid request body: {}", rejection.body_text()))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body.map_err(invalid_body)?;

    let email = Email::new(req.email)?;

    if req.password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(AuthError::Validation(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LENGTH
        )));
    }

    let use_case = RegisterUseCase::new(state.repo.clone());

    let user = use_case
        .execute(RegisterInput {
            email,
            password: ClearTextPassword::new(req.password),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserResponse::from(&user),
            message: "User created successfully".to_string(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body.map_err(invalid_body)?;

    let email = Email::new(req.email)?;

    if req.password.is_empty() {
        return Err(AuthError::Validation(
            "Password cannot be empty".to_string(),
        ));
    }

    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email,
            password: ClearTextPassword::new(req.password),
        })
        .await?;

    let cookie = state
        .config
        .cookie_settings()
        .issue_header(&output.session_token, state.config.session_ttl_secs());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            user: UserResponse::from(&output.user),
            message: "Login successful".to_string(),
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.session_cookie_name)
        .ok_or(AuthError::SessionCookieMissing)?;

    let use_case = LogoutUseCase::new(state.repo.clone());
    use_case.execute(&token).await?;

    let cookie = state.config.cookie_settings().clear_header();

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}

// ============================================================================
// Me (protected)
// ============================================================================

/// GET /api/auth/me
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

// ============================================================================
// Logout All (protected)
// ============================================================================

/// POST /api/auth/logout-all
pub async fn logout_all<R>(
    State(state): State<AuthAppState<R>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.repo.clone());
    use_case.execute_all(&user.id).await?;

    let cookie = state.config.cookie_settings().clear_header();

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "Logged out from all devices".to_string(),
        }),
    ))
}
