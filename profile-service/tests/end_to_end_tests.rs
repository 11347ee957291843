mod common;

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth_service::credential::errors::CredentialError;
use auth_service::credential::models::AccountId;
use auth_service::credential::models::Credential;
use auth_service::credential::models::EmailAddress;
use auth_service::credential::ports::CredentialRepository;
use auth_service::credential::service::Authority;
use auth_service::outbound::profiles::HttpProfileProvisioner;
use axum::http::StatusCode;
use common::bind;
use common::TestApp;
use common::TEST_SECRET;
use profile_service::outbound::authority::RemoteTokenVerifier;
use serde_json::json;
use serde_json::Value;

#[derive(Default)]
struct InMemoryCredentialRepository {
    credentials: Mutex<Vec<Credential>>,
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, CredentialError> {
        Ok(self
            .credentials
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email == *email)
            .cloned())
    }

    async fn insert(&self, credential: Credential) -> Result<AccountId, CredentialError> {
        let mut credentials = self.credentials.lock().unwrap();
        if credentials.iter().any(|c| c.email == credential.email) {
            return Err(CredentialError::EmailConflict(credential.email.to_string()));
        }
        let id = credential.id;
        credentials.push(credential);
        Ok(id)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), CredentialError> {
        self.credentials.lock().unwrap().retain(|c| c.id != *id);
        Ok(())
    }
}

/// Both services wired to each other over real sockets.
struct Platform {
    authority_address: String,
    authority_server: tokio::task::JoinHandle<()>,
    profiles: TestApp,
    client: reqwest::Client,
}

impl Platform {
    async fn spawn() -> Self {
        let authority_listener = bind().await;
        let profile_listener = bind().await;
        let authority_address = format!(
            "http://127.0.0.1:{}",
            authority_listener.local_addr().unwrap().port()
        );
        let profile_address = format!(
            "http://127.0.0.1:{}",
            profile_listener.local_addr().unwrap().port()
        );

        let verifier =
            RemoteTokenVerifier::new(&authority_address, Duration::from_secs(5)).unwrap();
        let profiles = TestApp::serve(
            profile_listener,
            Arc::new(verifier),
            Authenticator::new(TEST_SECRET),
        );

        let authority = Authority::new(
            Arc::new(InMemoryCredentialRepository::default()),
            Arc::new(HttpProfileProvisioner::new(&profile_address, Duration::from_secs(5)).unwrap()),
            Arc::new(Authenticator::new(TEST_SECRET)),
        );
        let router = auth_service::inbound::http::router::create_router(Arc::new(authority));
        let authority_server = tokio::spawn(async move {
            axum::serve(authority_listener, router)
                .await
                .expect("Server error");
        });

        Self {
            authority_address,
            authority_server,
            profiles,
            client: reqwest::Client::new(),
        }
    }

    async fn post_authority(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.authority_address, path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    async fn me(&self, token: &str) -> reqwest::Response {
        self.profiles
            .get_authenticated("/api/users/me", token)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

#[tokio::test]
async fn test_register_login_and_read_own_profile() {
    let platform = Platform::spawn().await;

    let response = platform
        .post_authority(
            "/api/auth/register",
            json!({ "name": "Ana", "email": "ana@x.com", "password": "secret1" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let first_token = body["data"]["token"].as_str().unwrap().to_string();

    // Profile created by the authority, readable with the first token
    let response = platform.me(&first_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["email"], "ana@x.com");
    assert_eq!(body["data"]["name"], "Ana");

    let response = platform
        .post_authority(
            "/api/auth/login",
            json!({ "email": "ana@x.com", "password": "wrongpass" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = platform
        .post_authority(
            "/api/auth/login",
            json!({ "email": "ana@x.com", "password": "secret1" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let second_token = body["data"]["token"].as_str().unwrap().to_string();

    let response = platform.me(&second_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = platform.me("tampered.token.value").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authority_down_is_service_unavailable() {
    let platform = Platform::spawn().await;

    let response = platform
        .post_authority(
            "/api/auth/register",
            json!({ "name": "Ana", "email": "ana@x.com", "password": "secret1" }),
        )
        .await;
    let body: Value = response.json().await.unwrap();
    let token = body["data"]["token"].as_str().unwrap().to_string();

    // Authority gone: protected calls fail as unavailable, not unauthorized
    platform.authority_server.abort();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let response = platform.me(&token).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict() {
    let platform = Platform::spawn().await;
    let body = json!({ "name": "Ana", "email": "ana@x.com", "password": "secret1" });

    let first = platform.post_authority("/api/auth/register", body.clone()).await;
    let second = platform.post_authority("/api/auth/register", body).await;

    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::CONFLICT);
}
