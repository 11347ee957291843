#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use auth_service::credential::errors::CredentialError;
use auth_service::credential::errors::ProvisioningError;
use auth_service::credential::models::AccountId;
use auth_service::credential::models::Credential;
use auth_service::credential::models::EmailAddress;
use auth_service::credential::models::NewProfile;
use auth_service::credential::ports::CredentialRepository;
use auth_service::credential::ports::ProfileProvisioner;
use auth_service::credential::service::Authority;
use auth_service::inbound::http::router::create_router;
use tokio::sync::Barrier;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store kept in memory, enforcing email uniqueness at insert.
///
/// With a barrier installed, every `find_by_email` waits until the barrier's
/// party count is reached, so concurrent registrations all pass the
/// pre-check before any of them inserts.
#[derive(Default)]
pub struct InMemoryCredentialRepository {
    credentials: Mutex<Vec<Credential>>,
    barrier: Option<Arc<Barrier>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_barrier(parties: usize) -> Self {
        Self {
            credentials: Mutex::new(Vec::new()),
            barrier: Some(Arc::new(Barrier::new(parties))),
        }
    }

    pub fn count(&self) -> usize {
        self.credentials.lock().unwrap().len()
    }

    pub fn contains(&self, id: &AccountId) -> bool {
        self.credentials
            .lock()
            .unwrap()
            .iter()
            .any(|credential| credential.id == *id)
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, CredentialError> {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        Ok(self
            .credentials
            .lock()
            .unwrap()
            .iter()
            .find(|credential| credential.email == *email)
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
        self.credentials
            .lock()
            .unwrap()
            .retain(|credential| credential.id != *id);
        Ok(())
    }
}

/// Profile provisioner that records every profile it is asked to create,
/// optionally failing every call.
#[derive(Default)]
pub struct RecordingProvisioner {
    profiles: Mutex<Vec<NewProfile>>,
    failure: Option<ProvisioningError>,
}

impl RecordingProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: ProvisioningError) -> Self {
        Self {
            profiles: Mutex::new(Vec::new()),
            failure: Some(failure),
        }
    }

    pub fn profiles(&self) -> Vec<NewProfile> {
        self.profiles.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileProvisioner for RecordingProvisioner {
    async fn provision(&self, profile: &NewProfile) -> Result<(), ProvisioningError> {
        self.profiles.lock().unwrap().push(profile.clone());
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub repository: Arc<InMemoryCredentialRepository>,
    pub provisioner: Arc<RecordingProvisioner>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(
            InMemoryCredentialRepository::new(),
            RecordingProvisioner::new(),
        )
        .await
    }

    pub async fn spawn_with(
        repository: InMemoryCredentialRepository,
        provisioner: RecordingProvisioner,
    ) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(repository);
        let provisioner = Arc::new(provisioner);
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));

        let authority = Authority::new(
            Arc::clone(&repository),
            Arc::clone(&provisioner),
            authenticator,
        );
        let router = create_router(Arc::new(authority));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET),
            repository,
            provisioner,
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

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }
}
