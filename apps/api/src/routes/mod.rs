pub mod form;
pub mod health;
pub mod label;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form::form_handler))
        .route("/health", get(health::health_handler))
        .route("/get-label", post(label::get_label_handler))
        .with_state(state)
}
