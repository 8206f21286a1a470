use crate::api::config::Config;
use crate::data::database::{Database, DatabaseError};
use crate::security::jwt::JwtService;
use std::sync::Arc;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: JwtService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, DatabaseError> {
        let db = Database::connect(&config.database_url)?;
        let jwt = JwtService::new(&config.jwt_secret, config.jwt_expiration_minutes);

        Ok(AppState {
            db,
            jwt,
            config: Arc::new(config),
        })
    }
}
