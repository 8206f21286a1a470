use crate::api::controllers::report_controller::show;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::get;

pub fn routes() -> Router<AppState> {
    Router::new().route("/{kind}", get(show))
}
