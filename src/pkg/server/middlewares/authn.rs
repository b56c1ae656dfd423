use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{
    pkg::{internal::auth::HireSource, server::state::AppState},
    prelude::{AppError, Result},
};

// The raw Authorization header value is the shared secret itself; no scheme
// prefix, no expiry. The matched hiring source rides along as an extension
// so the handler can log where the submission came from.
pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok());
    if let Some(token) = token {
        if let Some(source) = state.tokens.source_for(token) {
            tracing::debug!("submission authorized, sourced via {}", source);
            request
                .extensions_mut()
                .insert(Arc::new(HireSource::new(source)));
            return Ok(next.run(request).await);
        }
    }
    tracing::warn!("authorization token missing or unknown, denying request");
    Err(AppError::Unauthorized)
}
