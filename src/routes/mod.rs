pub mod helpers;
pub mod metrics;
pub mod openapi;
pub mod system;
pub mod template_routes;
pub mod webhook_routes;

use axum::Router;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(system::routes())
        .merge(webhook_routes::routes())
        .merge(template_routes::routes())
        .merge(metrics::routes())
        .merge(openapi::routes())
        .with_state(state)
}
