use crate::api::controllers::price_controller::{index, store, update};
use crate::api::state::AppState;
use axum::Router;
use axum::routing::{get, put};

/// `GET /?product_id=` narrows the list to one product.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(store))
        .route("/{id}", put(update))
}
