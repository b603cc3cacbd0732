use std::{env, fmt, net::SocketAddr, path::PathBuf};

use tracing::warn;

use crate::error::AppError;

const MIN_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub static_root: PathBuf,
    pub jwt_secret: String,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials used to provision the first admin at start-up.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url)
            .field("listen_addr", &self.listen_addr)
            .field("static_root", &self.static_root)
            .field("jwt_secret", &"<redacted>")
            .field(
                "bootstrap_admin",
                &self.bootstrap_admin.as_ref().map(|admin| &admin.username),
            )
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://cardex.db".to_string());
        let listen_addr: SocketAddr = lookup("APP_LISTEN_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let static_root = lookup("STATIC_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("static"));

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.trim().is_empty())
            .ok_or_else(|| AppError::Config("JWT_SECRET must be set".into()))?;
        if jwt_secret.len() < MIN_SECRET_LEN {
            warn!("JWT_SECRET is shorter than {MIN_SECRET_LEN} bytes");
        }

        let bootstrap_admin = match (lookup("ADMIN_USERNAME"), lookup("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(BootstrapAdmin { username, password }),
            (None, None) => None,
            _ => {
                return Err(AppError::Config(
                    "ADMIN_USERNAME and ADMIN_PASSWORD must be set together".into(),
                ))
            }
        };

        Ok(Self {
            database_url,
            listen_addr,
            static_root,
            jwt_secret,
            bootstrap_admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_secret_fails_fast() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("JWT_SECRET")));

        let err = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET", "   ")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("JWT_SECRET", "a-very-long-test-secret-value-123")]))
                .unwrap();
        assert_eq!(config.database_url, "sqlite://cardex.db");
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.static_root, PathBuf::from("static"));
        assert!(config.bootstrap_admin.is_none());
    }

    #[test]
    fn invalid_listen_addr_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "secret"),
            ("APP_LISTEN_ADDR", "not-an-addr"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("APP_LISTEN_ADDR")));
    }

    #[test]
    fn bootstrap_admin_needs_both_values() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "secret"),
            ("ADMIN_USERNAME", "admin"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let config = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "secret"),
            ("ADMIN_USERNAME", "admin"),
            ("ADMIN_PASSWORD", "admin123"),
        ]))
        .unwrap();
        let admin = config.bootstrap_admin.unwrap();
        assert_eq!(admin.username, "admin");
        assert_eq!(admin.password, "admin123");
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("JWT_SECRET", "super-secret-value")])).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-value"));
    }
}
