use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::credential::errors::CredentialError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::CredentialId;
use crate::domain::credential::models::NewCredential;
use crate::domain::credential::models::Username;
use crate::domain::credential::ports::CredentialStore;

/// Process-local credential store.
///
/// The uniqueness check and the insert happen under one write lock, so two
/// concurrent registrations of the same username cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    /// Map of normalized username -> Credential
    credentials: Arc<RwLock<HashMap<String, Credential>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn exists(&self, username: &Username) -> Result<bool, CredentialError> {
        Ok(self.credentials.read().await.contains_key(username.as_str()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, CredentialError> {
        Ok(self.credentials.read().await.get(username.as_str()).cloned())
    }

    async fn create(&self, credential: NewCredential) -> Result<Credential, CredentialError> {
        let mut credentials = self.credentials.write().await;

        match credentials.entry(credential.username.as_str().to_string()) {
            Entry::Occupied(_) => Err(CredentialError::UsernameTaken(
                credential.username.as_str().to_string(),
            )),
            Entry::Vacant(slot) => {
                let created = Credential {
                    id: CredentialId::new(),
                    username: credential.username,
                    password: credential.password,
                    created_at: Utc::now(),
                };
                slot.insert(created.clone());
                Ok(created)
            }
        }
    }
}
