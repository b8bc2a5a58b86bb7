use axum::Router;

use crate::infra::state::AppState;

pub mod greeter;

/// View routes.
pub fn views(state: AppState) -> Router {
    Router::new().merge(greeter::routes()).with_state(state)
}
