//! Shared test helpers for the HTTP integration tests.
//!
//! Builds the real router over the in-memory stores so every test
//! exercises full request semantics (status codes, bodies, cookies)
//! without a live PostgreSQL instance.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use linkfolio_api::router::build_router;
use linkfolio_api::state::AppState;
use linkfolio_auth::jwt::{JwtDecoder, JwtEncoder};
use linkfolio_auth::password::{CredentialVerifier, PasswordHasher};
use linkfolio_core::config::AppConfig;
use linkfolio_database::repositories::memory::{MemoryLinkStore, MemoryUserStore};
use linkfolio_database::store::{LinkStore, UserStore};
use linkfolio_entity::link::{CreateLink, Link};
use linkfolio_entity::user::{CreateUser, User};
use linkfolio_service::link::LinkService;
use linkfolio_service::session::SessionService;
use linkfolio_service::user::UserService;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// User store for direct seeding and assertions
    pub users: Arc<MemoryUserStore>,
    /// Link store for direct seeding and assertions
    pub links: Arc<MemoryLinkStore>,
    /// Password hasher matching the one wired into the app
    pub hasher: Arc<PasswordHasher>,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let config = AppConfig::load("test").expect("Failed to load test config");

        let users = Arc::new(MemoryUserStore::new());
        let links = Arc::new(MemoryLinkStore::new());
        let hasher = Arc::new(PasswordHasher::new());

        let user_store: Arc<dyn UserStore> = users.clone();
        let link_store: Arc<dyn LinkStore> = links.clone();
        let verifier: Arc<dyn CredentialVerifier> = hasher.clone();

        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let session_service = Arc::new(
            SessionService::new(
                Arc::clone(&user_store),
                Arc::clone(&verifier),
                jwt_encoder,
                Arc::clone(&jwt_decoder),
            )
            .expect("Failed to build session service"),
        );
        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_store),
            Arc::clone(&verifier),
        ));
        let link_service = Arc::new(LinkService::new(
            Arc::clone(&link_store),
            Arc::clone(&user_store),
        ));

        let state = AppState {
            config: Arc::new(config),
            user_store,
            link_store,
            jwt_decoder,
            session_service,
            user_service,
            link_service,
        };

        Self {
            router: build_router(state),
            users,
            links,
            hasher,
        }
    }

    /// Seed a user directly into the store and return the record
    pub async fn create_user(
        &self,
        name: &str,
        username: &str,
        email: &str,
        password: &str,
    ) -> User {
        let password_hash = self.hasher.hash(password).expect("Failed to hash password");
        self.users
            .insert(&CreateUser {
                name: name.to_string(),
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
            .expect("Failed to create test user")
    }

    /// Seed a link directly into the store and return the record
    pub async fn seed_link(&self, owner: Uuid, url: &str, desc: &str, position: i32) -> Link {
        self.links
            .insert(&CreateLink {
                url: url.to_string(),
                desc: desc.to_string(),
                position,
                user_id: owner,
            })
            .await
            .expect("Failed to seed link")
    }

    /// Number of users in the store
    pub async fn user_count(&self) -> u64 {
        self.users.count().await.expect("Failed to count users")
    }

    /// Number of links in the store
    pub async fn link_count(&self) -> u64 {
        self.links.count().await.expect("Failed to count links")
    }

    /// Look up a user by username
    pub async fn find_user(&self, username: &str) -> Option<User> {
        self.users
            .find_by_username(username)
            .await
            .expect("Failed to query users")
    }

    /// Look up a link by id
    pub async fn find_link(&self, id: Uuid) -> Option<Link> {
        self.links.find_by_id(id).await.expect("Failed to query links")
    }

    /// An owner's links in display order
    pub async fn links_of(&self, owner: Uuid) -> Vec<Link> {
        self.links
            .find_by_owner(owner)
            .await
            .expect("Failed to list links")
    }

    /// Login and return the JWT access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self.request("POST", "/api/login", Some(body), None).await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("accessToken")
            .and_then(|v| v.as_str())
            .expect("No accessToken in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_with_cookie(method, path, body, token, None)
            .await
    }

    /// Make an HTTP request carrying a Cookie header
    pub async fn request_with_cookie(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(cookie) = cookie {
            req = req.header("Cookie", cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            headers,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Response headers (for Set-Cookie assertions)
    pub headers: HeaderMap,
}

impl TestResponse {
    /// The `error` field of the body, if any
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(|v| v.as_str())
    }

    /// All Set-Cookie header values
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect()
    }

    /// The `refreshToken=<value>` pair from Set-Cookie, attribute-free,
    /// ready to echo back in a Cookie header
    pub fn refresh_cookie(&self) -> String {
        self.set_cookies()
            .iter()
            .find(|c| c.starts_with("refreshToken="))
            .and_then(|c| c.split(';').next().map(String::from))
            .expect("No refresh cookie in response")
    }
}
