//! Submission handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Submission routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_submission))
        .route("/", get(handler::list_submissions))
        .route("/run-sample", post(handler::run_sample))
        .route("/run-custom", post(handler::run_custom))
        .route("/user/{user_id}", get(handler::list_user_submissions))
        .route("/{id}", get(handler::get_submission))
}
