#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenVerifier;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Json;
use axum::Router;
use profile_service::inbound::http::router::create_router;
use profile_service::profile::errors::ProfileError;
use profile_service::profile::models::EmailAddress;
use profile_service::profile::models::Profile;
use profile_service::profile::models::ProfileId;
use profile_service::profile::ports::ProfileRepository;
use profile_service::profile::service::ProfileService;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Profile store kept in memory, enforcing email uniqueness at insert.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<Vec<Profile>>,
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, profile: Profile) -> Result<Profile, ProfileError> {
        let mut profiles = self.profiles.lock().unwrap();

        if profiles.iter().any(|p| p.email == profile.email) {
            return Err(ProfileError::EmailAlreadyExists(profile.email.to_string()));
        }

        profiles.push(profile.clone());
        Ok(profile)
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == *id)
            .cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Profile>, ProfileError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.email == *email)
            .cloned())
    }
}

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Authenticator,
}

impl TestApp {
    /// Spawn with tokens verified in-process against the test secret
    pub async fn spawn() -> Self {
        let authenticator = Authenticator::new(TEST_SECRET);
        let verifier = Arc::new(authenticator.local_verifier());
        let listener = bind().await;
        Self::serve(listener, verifier, authenticator)
    }

    /// Spawn on an already bound listener with the given verifier
    pub fn serve(
        listener: tokio::net::TcpListener,
        token_verifier: Arc<dyn TokenVerifier>,
        authenticator: Authenticator,
    ) -> Self {
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryProfileRepository::default());
        let profile_service = Arc::new(ProfileService::new(repository));
        let router = create_router(profile_service, token_verifier);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }
}

/// Bind a random local port (0 = OS assigns)
pub async fn bind() -> tokio::net::TcpListener {
    tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port")
}

/// A port nobody listens on
pub async fn closed_port() -> u16 {
    let listener = bind().await;
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Authority stand-in answering every validation call with a fixed reply.
///
/// Records the `Authorization` header of each call.
pub struct StubAuthority {
    pub base_url: String,
    pub received: Arc<Mutex<Vec<Option<String>>>>,
}

impl StubAuthority {
    pub async fn spawn(status: StatusCode, body: Value, delay: Duration) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&received);

        let router = Router::new().route(
            "/api/auth/validate",
            post(move |headers: axum::http::HeaderMap| {
                let log = Arc::clone(&log);
                let body = body.clone();
                async move {
                    log.lock().unwrap().push(
                        headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string),
                    );
                    tokio::time::sleep(delay).await;
                    (status, Json(body))
                }
            }),
        );

        let listener = bind().await;
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            received,
        }
    }
}
