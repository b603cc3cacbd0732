use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::{
    auth::{password, AuthError, CredentialStore},
    db::DbPool,
    error::AppError,
    models::admin::Admin,
};

/// Admin accounts in SQLite. Login only reads; writes go through provisioning.
#[derive(Clone)]
pub struct AdminStore {
    db: DbPool,
}

impl AdminStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, username, password_hash, created_at FROM admins WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(admin)
    }

    pub async fn create_admin(&self, username: &str, password: &str) -> Result<Admin, AppError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }
        let owned = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&owned))
            .await
            .context("password hashing task failed")??;

        let created = sqlx::query_as::<_, Admin>(
            r#"INSERT INTO admins (username, password_hash, created_at) VALUES (?1, ?2, ?3)
               RETURNING id, username, password_hash, created_at"#,
        )
        .bind(username)
        .bind(&password_hash)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await;

        match created {
            Ok(admin) => {
                info!(admin_id = admin.id, username, "admin account created");
                Ok(admin)
            }
            Err(err)
                if err
                    .as_database_error()
                    .is_some_and(|db_err| db_err.is_unique_violation()) =>
            {
                Err(AppError::BadRequest("用户名已存在".into()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Creates the admin unless the username is already taken. Returns whether
    /// a new account was written.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, AppError> {
        if self.find_by_username(username).await?.is_some() {
            return Ok(false);
        }
        self.create_admin(username, password).await?;
        Ok(true)
    }
}

#[async_trait]
impl CredentialStore for AdminStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AuthError> {
        AdminStore::find_by_username(self, username)
            .await
            .map_err(|err| AuthError::Internal(err.into()))
    }
}
