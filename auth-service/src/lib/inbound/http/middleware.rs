use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::account::models::EmailAddress;
use crate::inbound::http::router::AppState;

/// Extension type to store the authorized identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub email: EmailAddress,
}

/// Middleware that resolves the bearer token to its active session
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(req.headers()).map_err(IntoResponse::into_response)?;

    let email = state.auth_service.authorize(token).await.map_err(|e| {
        tracing::warn!(error = %e, "Token authorization failed");
        ApiError::from(e).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedAccount { email });

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
            )
        })
}
