use crate::api::controllers::profile_controller::{show, update};
use crate::api::state::AppState;
use axum::Router;
use axum::routing::get;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(show).put(update))
}
