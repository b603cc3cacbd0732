use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use super::{password, AuthError, SessionKeys, SessionToken};
use crate::models::admin::Admin;

/// Read-only view of the persisted admin accounts.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AuthError>;
}

/// Verifies admin credentials and mints session tokens.
pub struct TokenIssuer<S> {
    store: S,
    keys: Arc<SessionKeys>,
    // Verified against when the username is unknown so both failure paths
    // do the same amount of work.
    dummy_hash: String,
}

impl<S: CredentialStore> TokenIssuer<S> {
    pub fn new(store: S, keys: Arc<SessionKeys>) -> Result<Self, AuthError> {
        let dummy_hash = password::hash_password("cardex-dummy-password")?;
        Ok(Self {
            store,
            keys,
            dummy_hash,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn issue_session(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionToken, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let admin = self.store.find_by_username(username).await?;
        let (admin_id, hash) = match &admin {
            Some(admin) => (Some(admin.id), admin.password_hash.clone()),
            None => (None, self.dummy_hash.clone()),
        };

        let supplied = password.to_owned();
        let matches =
            tokio::task::spawn_blocking(move || password::verify_password(&supplied, &hash))
                .await
                .context("password verification task failed")??;

        let admin_id = match admin_id {
            Some(id) if matches => id,
            _ => {
                warn!(username, "admin login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let token = self.keys.sign(admin_id, Utc::now())?;
        info!(admin_id, "admin session issued");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingStore {
        admins: Vec<Admin>,
        lookups: AtomicUsize,
    }

    impl CountingStore {
        fn with_admin(username: &str, password: &str) -> Self {
            Self {
                admins: vec![Admin {
                    id: 1,
                    username: username.to_string(),
                    password_hash: password::hash_password(password).unwrap(),
                    created_at: Utc::now(),
                }],
                lookups: AtomicUsize::new(0),
            }
        }

        fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CredentialStore for CountingStore {
        async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AuthError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.admins.iter().find(|a| a.username == username).cloned())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl CredentialStore for FailingStore {
        async fn find_by_username(&self, _username: &str) -> Result<Option<Admin>, AuthError> {
            Err(AuthError::Internal(anyhow::anyhow!("database is down")))
        }
    }

    fn issuer<S: CredentialStore>(store: S) -> (TokenIssuer<S>, Arc<SessionKeys>) {
        let keys = Arc::new(SessionKeys::new("issuer-test-secret"));
        (TokenIssuer::new(store, keys.clone()).unwrap(), keys)
    }

    #[tokio::test]
    async fn valid_credentials_yield_verifiable_token() {
        let (issuer, keys) = issuer(CountingStore::with_admin("admin", "admin123"));
        let token = issuer.issue_session("admin", "admin123").await.unwrap();
        let claims = keys.verify(&token.token).unwrap();
        assert_eq!(claims.admin_id, 1);
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_look_the_same() {
        let (issuer, _) = issuer(CountingStore::with_admin("admin", "admin123"));

        let wrong_password = issuer.issue_session("admin", "wrong").await.unwrap_err();
        let unknown_user = issuer.issue_session("nobody", "admin123").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert_eq!(wrong_password.status(), unknown_user.status());
    }

    #[tokio::test]
    async fn username_lookup_is_case_sensitive() {
        let (issuer, _) = issuer(CountingStore::with_admin("admin", "admin123"));
        let err = issuer.issue_session("Admin", "admin123").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn missing_credentials_skip_the_store() {
        let (issuer, _) = issuer(CountingStore::with_admin("admin", "admin123"));

        for (username, password) in [("", "admin123"), ("admin", ""), ("", ""), ("  ", "x")] {
            let err = issuer.issue_session(username, password).await.unwrap_err();
            assert!(matches!(err, AuthError::MissingCredentials));
        }
        assert_eq!(issuer.store().lookups(), 0);

        let _ = issuer.issue_session("admin", "admin123").await.unwrap();
        assert_eq!(issuer.store().lookups(), 1);
    }

    #[tokio::test]
    async fn store_failure_is_internal() {
        let (issuer, _) = issuer(FailingStore);
        let err = issuer.issue_session("admin", "admin123").await.unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
