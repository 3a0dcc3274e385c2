use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let token = bearer_token(&headers)?;

    state.auth_service.logout(token).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: "Logged out successfully".to_string(),
        },
    ))
}
