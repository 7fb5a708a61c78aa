//! Unit and integration tests for the auth crate
//!
//! Uses an in-memory repository standing in for PostgreSQL; the unique
//! email check inside `create_user` mirrors the database constraint.

use std::sync::{Arc, Mutex};

use chrono::Duration;
use platform::password::ClearTextPassword;
use platform::token::SessionToken;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginOutput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
    ResolveSessionUseCase,
};
use crate::domain::entity::{Session, User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{Email, UserId};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Clone, Default)]
struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    users: Vec<User>,
    sessions: Vec<Session>,
}

impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &User) -> AuthResult<()> {
        let mut inner = self.inner.lock().unwrap();
        // Stand-in for the database unique constraint on email
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::UserExists);
        }
        inner.users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| &u.email == email).cloned())
    }
}

impl SessionRepository for MemoryStore {
    async fn create_session(&self, session: &Session) -> AuthResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.sessions.push(session.clone());
        Ok(())
    }

    async fn find_user_by_token(&self, token: &str) -> AuthResult<Option<User>> {
        let inner = self.inner.lock().unwrap();
        let session = inner
            .sessions
            .iter()
            .find(|s| s.token.as_str() == token && !s.is_expired());

        Ok(session.and_then(|s| inner.users.iter().find(|u| u.id == s.user_id).cloned()))
    }

    async fn delete_by_token(&self, token: &str) -> AuthResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.sessions.retain(|s| s.token.as_str() != token);
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.sessions.len();
        inner.sessions.retain(|s| &s.user_id != user_id);
        Ok((before - inner.sessions.len()) as u64)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.sessions.len();
        inner.sessions.retain(|s| !s.is_expired());
        Ok((before - inner.sessions.len()) as u64)
    }
}

impl MemoryStore {
    fn session_count(&self) -> usize {
        self.inner.lock().unwrap().sessions.len()
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig::development())
}

async fn register(store: &MemoryStore, email: &str, password: &str) -> AuthResult<User> {
    RegisterUseCase::new(Arc::new(store.clone()))
        .execute(RegisterInput {
            email: Email::new(email).unwrap(),
            password: ClearTextPassword::new(password.to_string()),
        })
        .await
}

async fn login(store: &MemoryStore, email: &str, password: &str) -> AuthResult<LoginOutput> {
    let repo = Arc::new(store.clone());
    LoginUseCase::new(repo.clone(), repo, config())
        .execute(LoginInput {
            email: Email::new(email).unwrap(),
            password: ClearTextPassword::new(password.to_string()),
        })
        .await
}

async fn resolve(store: &MemoryStore, token: &str) -> AuthResult<User> {
    ResolveSessionUseCase::new(Arc::new(store.clone()))
        .execute(token)
        .await
}

// ============================================================================
// Use case tests
// ============================================================================

mod use_case_tests {
    use super::*;

    #[tokio::test]
    async fn register_then_login_then_resolve() {
        let store = MemoryStore::default();

        let user = register(&store, "alice@example.com", "secret1").await.unwrap();

        let output = login(&store, "alice@example.com", "secret1").await.unwrap();
        assert_eq!(output.user.id, user.id);
        assert_eq!(output.session_token.len(), platform::token::TOKEN_LEN);

        let resolved = resolve(&store, &output.session_token).await.unwrap();
        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.email.as_str(), "alice@example.com");
    }

    #[tokio::test]
    async fn register_does_not_create_a_session() {
        let store = MemoryStore::default();
        register(&store, "alice@example.com", "secret1").await.unwrap();
        assert_eq!(store.session_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_email_fails_with_user_exists() {
        let store = MemoryStore::default();

        register(&store, "alice@example.com", "secret1").await.unwrap();

        let err = register(&store, "alice@example.com", "other-password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserExists));
    }

    #[tokio::test]
    async fn store_constraint_settles_registration_race() {
        // Simulate the race: the existence check passed for both callers,
        // so the second insert hits the store constraint directly.
        let store = MemoryStore::default();

        register(&store, "alice@example.com", "secret1").await.unwrap();

        let hash = platform::password::HashedPassword::from_clear_text(
            &ClearTextPassword::new("secret2".to_string()),
        )
        .unwrap();
        let dup = User::new(Email::new("alice@example.com").unwrap(), hash);

        let err = store.create_user(&dup).await.unwrap_err();
        assert!(matches!(err, AuthError::UserExists));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let store = MemoryStore::default();

        register(&store, "alice@example.com", "secret1").await.unwrap();

        let wrong_password = login(&store, "alice@example.com", "not-the-password")
            .await
            .unwrap_err();
        let unknown_email = login(&store, "nobody@example.com", "secret1")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(
            wrong_password.status_code(),
            unknown_email.status_code()
        );
    }

    #[tokio::test]
    async fn login_output_is_debuggable_without_leaking_the_hash() {
        let store = MemoryStore::default();

        register(&store, "alice@example.com", "secret1").await.unwrap();
        let output = login(&store, "alice@example.com", "secret1").await.unwrap();

        // assert-style helpers format the value on failure; the embedded
        // user must keep its hash redacted
        let debug = format!("{:?}", output);
        assert!(debug.contains(&output.session_token));
        assert!(!debug.contains("argon2id"));
        assert!(!debug.contains("secret1"));
    }

    #[tokio::test]
    async fn each_login_creates_an_independent_session() {
        let store = MemoryStore::default();

        register(&store, "alice@example.com", "secret1").await.unwrap();

        let first = login(&store, "alice@example.com", "secret1").await.unwrap();
        let second = login(&store, "alice@example.com", "secret1").await.unwrap();

        assert_ne!(first.session_token, second.session_token);
        assert_eq!(store.session_count(), 2);

        // Logging out one device leaves the other alone
        LogoutUseCase::new(Arc::new(store.clone()))
            .execute(&first.session_token)
            .await
            .unwrap();

        assert!(resolve(&store, &first.session_token).await.is_err());
        assert!(resolve(&store, &second.session_token).await.is_ok());
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let store = MemoryStore::default();

        register(&store, "alice@example.com", "secret1").await.unwrap();
        let output = login(&store, "alice@example.com", "secret1").await.unwrap();

        let use_case = LogoutUseCase::new(Arc::new(store.clone()));
        use_case.execute(&output.session_token).await.unwrap();

        let err = resolve(&store, &output.session_token).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionInvalid));

        // Second logout of the same token is a no-op, not an error
        use_case.execute(&output.session_token).await.unwrap();
    }

    #[tokio::test]
    async fn logout_all_spares_other_users() {
        let store = MemoryStore::default();

        let alice = register(&store, "alice@example.com", "secret1").await.unwrap();
        register(&store, "bob@example.com", "secret2").await.unwrap();

        let alice_1 = login(&store, "alice@example.com", "secret1").await.unwrap();
        let alice_2 = login(&store, "alice@example.com", "secret1").await.unwrap();
        let bob = login(&store, "bob@example.com", "secret2").await.unwrap();

        let deleted = LogoutUseCase::new(Arc::new(store.clone()))
            .execute_all(&alice.id)
            .await
            .unwrap();
        assert_eq!(deleted, 2);

        assert!(resolve(&store, &alice_1.session_token).await.is_err());
        assert!(resolve(&store, &alice_2.session_token).await.is_err());
        assert!(resolve(&store, &bob.session_token).await.is_ok());
    }

    #[tokio::test]
    async fn expired_session_is_rejected_before_cleanup_and_gone_after() {
        let store = MemoryStore::default();

        let user = register(&store, "alice@example.com", "secret1").await.unwrap();

        let expired = Session::new(
            user.id,
            SessionToken::generate().unwrap(),
            Duration::seconds(-1),
        );
        store.create_session(&expired).await.unwrap();

        // Lazy expiry: rejected while the row still exists
        let err = resolve(&store, expired.token.as_str()).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionInvalid));
        assert_eq!(store.session_count(), 1);

        // The sweep reaps the row; running it again is a no-op
        assert_eq!(store.cleanup_expired().await.unwrap(), 1);
        assert_eq!(store.session_count(), 0);
        assert_eq!(store.cleanup_expired().await.unwrap(), 0);
    }
}

// ============================================================================
// HTTP tests (full router, in-memory store)
// ============================================================================

mod http_tests {
    use super::*;
    use crate::presentation::router::auth_router_generic;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn app(store: &MemoryStore) -> Router {
        auth_router_generic(store.clone(), AuthConfig::development())
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Pull `session_token=<value>` out of a Set-Cookie header
    fn session_cookie(response: &axum::response::Response) -> String {
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("Set-Cookie present")
            .to_str()
            .unwrap();
        set_cookie
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn full_session_lifecycle() {
        let store = MemoryStore::default();

        // Register
        let response = app(&store)
            .oneshot(json_post(
                "/register",
                r#"{"email":"alice@example.com","password":"secret1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["user"]["email"], "alice@example.com");

        // Login sets the session cookie
        let response = app(&store)
            .oneshot(json_post(
                "/login",
                r#"{"email":"alice@example.com","password":"secret1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(set_cookie.contains("Max-Age=604800"));
        let cookie = session_cookie(&response);

        // /me with the cookie
        let response = app(&store)
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["email"], "alice@example.com");

        // /me without a cookie is rejected before any lookup
        let response = app(&store)
            .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Logout clears the cookie
        let response = app(&store)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_cookie(&response).ends_with("="));

        // The revoked cookie no longer works
        let response = app(&store)
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn duplicate_register_returns_conflict() {
        let store = MemoryStore::default();

        let first = app(&store)
            .oneshot(json_post(
                "/register",
                r#"{"email":"alice@example.com","password":"secret1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app(&store)
            .oneshot(json_post(
                "/register",
                r#"{"email":"alice@example.com","password":"secret1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn register_validation_failures_are_bad_requests() {
        let store = MemoryStore::default();

        let response = app(&store)
            .oneshot(json_post(
                "/register",
                r#"{"email":"not-an-email","password":"secret1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app(&store)
            .oneshot(json_post(
                "/register",
                r#"{"email":"alice@example.com","password":"short"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let store = MemoryStore::default();

        // Missing field
        let response = app(&store)
            .oneshot(json_post("/register", r#"{"email":"alice@example.com"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Not JSON at all
        let response = app(&store)
            .oneshot(json_post("/login", "not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bad_login_returns_unauthorized() {
        let store = MemoryStore::default();

        app(&store)
            .oneshot(json_post(
                "/register",
                r#"{"email":"alice@example.com","password":"secret1"}"#,
            ))
            .await
            .unwrap();

        let response = app(&store)
            .oneshot(json_post(
                "/login",
                r#"{"email":"alice@example.com","password":"wrong"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn logout_without_cookie_is_bad_request() {
        let store = MemoryStore::default();

        let response = app(&store)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn stale_cookie_is_cleared_on_rejection() {
        let store = MemoryStore::default();

        let response = app(&store)
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(header::COOKIE, format!("session_token={}", "0".repeat(64)))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("rejection clears the cookie")
            .to_str()
            .unwrap();
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn logout_all_invalidates_every_device() {
        let store = MemoryStore::default();

        app(&store)
            .oneshot(json_post(
                "/register",
                r#"{"email":"alice@example.com","password":"secret1"}"#,
            ))
            .await
            .unwrap();

        let login_body = r#"{"email":"alice@example.com","password":"secret1"}"#;
        let first = app(&store).oneshot(json_post("/login", login_body)).await.unwrap();
        let second = app(&store).oneshot(json_post("/login", login_body)).await.unwrap();
        let first_cookie = session_cookie(&first);
        let second_cookie = session_cookie(&second);

        let response = app(&store)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout-all")
                    .header(header::COOKIE, &first_cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        for cookie in [&first_cookie, &second_cookie] {
            let response = app(&store)
                .oneshot(
                    Request::builder()
                        .uri("/me")
                        .header(header::COOKIE, cookie)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
