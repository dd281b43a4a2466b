use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/records",
            get(handlers::list_records).post(handlers::create_record),
        )
        .route("/api/today", get(handlers::get_today))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/profile",
            get(handlers::get_profile).put(handlers::save_profile),
        )
        .route("/api/goals", get(handlers::list_goals))
        .with_state(state)
}
