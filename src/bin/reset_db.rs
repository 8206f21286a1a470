use brewery_server_lib::api::config::Config;
use brewery_server_lib::data::database::Database;
use brewery_server_lib::data::migrations;
use brewery_server_lib::data::models::user::{NewUser, UserKind};
use brewery_server_lib::data::repos::implementors::user_repo::UserRepo;
use brewery_server_lib::data::repos::traits::repository::Repository;
use brewery_server_lib::security::password::hash_password;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Drops every table, re-runs the migrations and seeds an administrator when
/// `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set. Refuses to run unless
/// `ALLOW_DB_RESET` is true.
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !config.allow_db_reset {
        tracing::error!("Refusing to reset the database: ALLOW_DB_RESET is not set");
        return ExitCode::FAILURE;
    }

    if let Err(e) = migrations::reset(&config.database_url).await {
        tracing::error!("Failed to reset database: {}", e);
        return ExitCode::FAILURE;
    }

    match (&config.admin_email, &config.admin_password) {
        (Some(email), Some(password)) => {
            if let Err(message) = seed_admin(&config.database_url, email, password).await {
                tracing::error!("Failed to seed administrator: {}", message);
                return ExitCode::FAILURE;
            }
        }
        _ => tracing::info!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping seed"),
    }

    tracing::info!("Database reset complete");
    ExitCode::SUCCESS
}

async fn seed_admin(database_url: &str, email: &str, password: &str) -> Result<(), String> {
    let db = Database::connect(database_url).map_err(|e| e.to_string())?;
    let repo = UserRepo::new(db);

    let password_hash = hash_password(password).await.map_err(|e| e.to_string())?;
    let admin = repo
        .add(NewUser {
            name: "Administrator".to_string(),
            email: email.to_string(),
            password_hash,
            kind: UserKind::Individual.as_str().to_string(),
            document: None,
            state_registration: None,
            administrator: true,
            guest: false,
        })
        .await
        .map_err(|e| e.to_string())?;

    tracing::info!("Administrator {} seeded with id {}", admin.email, admin.id);
    Ok(())
}
