use crate::api::controllers::stock_controller::{
    index_amounts, index_operations, store_operation, update_operation,
};
use crate::api::state::AppState;
use axum::Router;
use axum::routing::{get, put};

pub fn operation_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_operations).post(store_operation))
        .route("/{id}", put(update_operation))
}

pub fn amount_routes() -> Router<AppState> {
    Router::new().route("/", get(index_amounts))
}
