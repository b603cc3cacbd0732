use std::sync::Arc;

use crate::{
    auth::{AuthError, AuthGuard, SessionKeys, TokenIssuer},
    config::AppConfig,
    db::DbPool,
    services::{admins::AdminStore, catalog::CatalogStore, content::ContentStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DbPool,
    pub admins: AdminStore,
    pub catalog: CatalogStore,
    pub content: ContentStore,
    pub issuer: Arc<TokenIssuer<AdminStore>>,
    pub guard: AuthGuard,
}

impl AppState {
    pub fn new(config: AppConfig, db: DbPool) -> Result<Self, AuthError> {
        let keys = Arc::new(SessionKeys::new(&config.jwt_secret));
        let admins = AdminStore::new(db.clone());
        let issuer = Arc::new(TokenIssuer::new(admins.clone(), keys.clone())?);
        Ok(Self {
            catalog: CatalogStore::new(db.clone()),
            content: ContentStore::new(db.clone()),
            guard: AuthGuard::new(keys),
            issuer,
            admins,
            config,
            db,
        })
    }
}
