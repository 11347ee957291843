mod common;

use std::sync::Arc;

use auth::Authenticator;
use auth_service::credential::errors::CredentialError;
use auth_service::credential::models::DisplayName;
use auth_service::credential::models::EmailAddress;
use auth_service::credential::models::Password;
use auth_service::credential::models::RegisterCommand;
use auth_service::credential::ports::AuthorityPort;
use auth_service::credential::service::Authority;
use common::InMemoryCredentialRepository;
use common::RecordingProvisioner;
use common::TEST_SECRET;

fn command(name: &str) -> RegisterCommand {
    RegisterCommand::new(
        DisplayName::new(name.to_string()).unwrap(),
        EmailAddress::new("ana@x.com".to_string()).unwrap(),
        Password::new("secret1".to_string()).unwrap(),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_registration_same_email_single_winner() {
    // Both registrations pass the pre-check before either inserts
    let repository = Arc::new(InMemoryCredentialRepository::with_barrier(2));
    let provisioner = Arc::new(RecordingProvisioner::new());
    let authority = Arc::new(Authority::new(
        Arc::clone(&repository),
        Arc::clone(&provisioner),
        Arc::new(Authenticator::new(TEST_SECRET)),
    ));

    let first = {
        let authority = Arc::clone(&authority);
        tokio::spawn(async move { authority.register(command("Ana")).await })
    };
    let second = {
        let authority = Arc::clone(&authority);
        tokio::spawn(async move { authority.register(command("Ana Two")).await })
    };

    let results = [first.await.unwrap(), second.await.unwrap()];

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(CredentialError::EmailConflict(_))))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 1);
    assert_eq!(repository.count(), 1);
    assert_eq!(provisioner.profiles().len(), 1);

    let winner = results
        .iter()
        .find_map(|r| r.as_ref().ok())
        .expect("one registration succeeds");
    assert!(repository.contains(&winner.account.id));
}
