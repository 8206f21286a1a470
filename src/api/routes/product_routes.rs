use crate::api::controllers::product_controller::{images, index, store, store_image, update};
use crate::api::state::AppState;
use axum::Router;
use axum::routing::{get, put};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(store))
        .route("/{id}", put(update))
        .route("/{id}/images", get(images).post(store_image))
}
