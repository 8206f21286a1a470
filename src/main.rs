use brewery_server_lib::api::config::Config;
use brewery_server_lib::api::server;
use brewery_server_lib::data::migrations;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

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

    match migrations::run_pending(&config.database_url).await {
        Ok(0) => tracing::info!("Database schema is up to date"),
        Ok(applied) => tracing::info!("Applied {} pending migrations", applied),
        Err(e) => {
            tracing::error!("Failed to migrate database: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if let Err(e) = server::start(config).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
