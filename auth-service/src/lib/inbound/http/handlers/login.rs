use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AuthError;
use crate::account::models::EmailAddress;
use crate::inbound::http::router::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let outcome = state
        .auth_service
        .login(&email, &body.password, Utc::now())
        .await
        .map_err(|e| match e {
            AuthError::UserNotFound(_) if state.conceal_unknown_accounts => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            AuthError::InvalidCredentials { .. } if state.conceal_unknown_accounts => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            _ => ApiError::from(e),
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: outcome.token,
            user: (&outcome.account).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub user: AccountData,
}
