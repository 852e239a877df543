//! Credential store tests against a real Postgres.
//!
//! Run with `cargo test -- --ignored` and `DATABASE_URL` pointing at a
//! server the tests may create databases on.

mod common;

use std::sync::Arc;

use account_service::domain::credential::errors::CredentialError;
use account_service::domain::credential::models::NewCredential;
use account_service::domain::credential::models::Password;
use account_service::domain::credential::models::RegisterCommand;
use account_service::domain::credential::models::Username;
use account_service::domain::credential::ports::AuthenticationServicePort;
use account_service::domain::credential::ports::CredentialStore;
use account_service::domain::credential::service::AuthenticationService;
use account_service::outbound::repositories::PostgresCredentialStore;
use auth::PasswordHasher;
use common::test_authenticator;
use common::TestDb;

fn new_credential(username: &str, password: &str) -> NewCredential {
    NewCredential {
        username: Username::new(username.to_string()).unwrap(),
        password: PasswordHasher::new().hash(password).unwrap(),
    }
}

#[tokio::test]
#[ignore = "requires Postgres"]
async fn test_create_then_find_returns_same_credential() {
    let db = TestDb::new().await;
    let store = PostgresCredentialStore::new(db.pool.clone());

    let new = new_credential("Alice", "Secr3t!");
    let expected_password = new.password.clone();

    let created = store.create(new).await.expect("Failed to create credential");
    assert_eq!(created.username.as_str(), "alice");
    assert_eq!(created.password, expected_password);

    let found = store
        .find_by_username(&Username::new("ALICE".to_string()).unwrap())
        .await
        .expect("Failed to query credential")
        .expect("Credential not found");

    assert_eq!(found.id, created.id);
    assert_eq!(found.username, created.username);
    assert_eq!(found.password, created.password);
    assert_eq!(found.created_at, created.created_at);
}

#[tokio::test]
#[ignore = "requires Postgres"]
async fn test_exists_and_missing_lookup() {
    let db = TestDb::new().await;
    let store = PostgresCredentialStore::new(db.pool.clone());
    let username = Username::new("bob".to_string()).unwrap();

    assert!(!store.exists(&username).await.unwrap());
    assert!(store.find_by_username(&username).await.unwrap().is_none());

    store.create(new_credential("bob", "pw")).await.unwrap();

    assert!(store.exists(&username).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Postgres"]
async fn test_duplicate_insert_is_username_taken() {
    let db = TestDb::new().await;
    let store = PostgresCredentialStore::new(db.pool.clone());

    store.create(new_credential("carol", "x")).await.unwrap();
    let err = store
        .create(new_credential("CAROL", "y"))
        .await
        .unwrap_err();

    assert!(matches!(err, CredentialError::UsernameTaken(ref name) if name == "carol"));
}

#[tokio::test]
#[ignore = "requires Postgres"]
async fn test_schema_rejects_non_normalized_rows() {
    let db = TestDb::new().await;

    let uppercase = sqlx::query(
        "INSERT INTO credentials (id, username, password_hash, password_salt) VALUES ($1, $2, $3, $4)",
    )
    .bind(uuid::Uuid::now_v7())
    .bind("Dave")
    .bind(vec![0u8; 64])
    .bind(vec![1u8; 128])
    .execute(&db.pool)
    .await;
    assert!(uppercase.is_err());

    let short_hash = sqlx::query(
        "INSERT INTO credentials (id, username, password_hash, password_salt) VALUES ($1, $2, $3, $4)",
    )
    .bind(uuid::Uuid::now_v7())
    .bind("dave")
    .bind(vec![0u8; 32])
    .bind(vec![1u8; 128])
    .execute(&db.pool)
    .await;
    assert!(short_hash.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires Postgres"]
async fn test_concurrent_registrations_have_one_winner() {
    let db = TestDb::new().await;
    let service = Arc::new(AuthenticationService::new(
        Arc::new(PostgresCredentialStore::new(db.pool.clone())),
        test_authenticator(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .register(RegisterCommand::new(
                        Username::new("Erin".to_string()).unwrap(),
                        Password::new(format!("password-{}", i)).unwrap(),
                    ))
                    .await
            })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        match handle.await.expect("Task panicked") {
            Ok(_) => winners += 1,
            Err(CredentialError::UsernameTaken(_)) => {}
            Err(other) => panic!("Unexpected error: {}", other),
        }
    }

    assert_eq!(winners, 1);
}
