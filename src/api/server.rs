use crate::api::config::Config;
use crate::api::middleware::{admin_or_guest_read_only, authenticate, guest_read_only};
use crate::api::response::TOTAL_COUNT;
use crate::api::routes::{
    coupon_routes, package_routes, price_routes, product_routes, profile_routes, report_routes,
    sale_routes, session_routes, size_routes, stock_routes, user_routes,
};
use crate::api::state::AppState;
use crate::data::database::DatabaseError;
use axum::Router;
use axum::middleware;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("server I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

async fn health() -> &'static str {
    "Brewery Server API is running!"
}

/// Builds the full router: `/api/v1/sessions` is public, `/api/v1/profile`
/// sits behind the guest gate and every resource behind the admin gate.
pub fn app(state: AppState) -> Router {
    let resources = Router::new()
        .nest("/packages", package_routes::routes())
        .nest("/sizes", size_routes::routes())
        .nest("/products", product_routes::routes())
        .nest("/prices", price_routes::routes())
        .nest("/coupons", coupon_routes::routes())
        .nest("/users", user_routes::routes())
        .nest("/stock-operations", stock_routes::operation_routes())
        .nest("/stock-amounts", stock_routes::amount_routes())
        .nest("/sales", sale_routes::routes())
        .nest("/reports", report_routes::routes())
        .route_layer(middleware::from_fn(admin_or_guest_read_only));

    let profile = Router::new()
        .nest("/profile", profile_routes::routes())
        .route_layer(middleware::from_fn(guest_read_only));

    let protected = Router::new()
        .merge(resources)
        .merge(profile)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let v1 = Router::new()
        .route("/", get(health))
        .nest("/sessions", session_routes::routes())
        .merge(protected);

    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([TOTAL_COUNT.clone()]);

    Router::new()
        .route("/api", get(health))
        .nest("/api/v1", v1)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

pub async fn start(config: Config) -> Result<(), ServerError> {
    let addr = config.listen_addr;
    let state = AppState::new(config)?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
