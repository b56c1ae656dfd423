use axum::middleware::from_fn_with_state;
use axum::routing::{get, put};
use axum::Router;

use super::handlers::probes::{healthz, livez};
use super::handlers::resumes;
use super::middlewares::authn;
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/developer-resumes", put(resumes::store))
        .layer(from_fn_with_state(state.clone(), authn::authenticate))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state)
}
