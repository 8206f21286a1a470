use crate::api::controllers::sale_controller::{index, store, update};
use crate::api::state::AppState;
use axum::Router;
use axum::routing::{get, put};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(store))
        .route("/{id}", put(update))
}
