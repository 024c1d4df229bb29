use std::sync::Arc;

use axum::{routing::post, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn scheduling_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/slots", post(handlers::generate_slots))
        .route("/slots/bookable", post(handlers::get_bookable_slots))
        .route("/availability", post(handlers::get_availability))
        .route(
            "/availability/specialty",
            post(handlers::get_specialty_availability),
        )
        .route("/placements", post(handlers::resolve_placement))
        .route("/placements/day", post(handlers::resolve_day_placements))
        .with_state(state)
}
