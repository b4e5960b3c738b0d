//! Admin bearer-token middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::app::verify_admin_token;
use crate::error::AppError;
use crate::AppState;

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Admin authentication middleware
///
/// Rejects the request unless it carries the configured admin token.
pub async fn admin_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&request).ok_or(AppError::Unauthorized)?;

    if !verify_admin_token(token, &state.admin_token_hash) {
        tracing::warn!(path = %request.uri().path(), "Rejected admin request with invalid token");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
