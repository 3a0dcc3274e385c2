use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::EmailError;
use crate::account::errors::ProfileError;
use crate::account::models::EmailAddress;
use crate::account::models::Profile;
use crate::account::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid profile: {0}")]
    Profile(#[from] ProfileError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        let profile = Profile::new(self.first_name, self.last_name)?;
        Ok(RegisterCommand::new(email, self.password, profile))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_into_command() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "alice@example.com",
            "password": "pw123",
            "first_name": "  Alice ",
            "last_name": ""
        }))
        .unwrap();

        let command = request.try_into_command().unwrap();
        assert_eq!(command.email.as_str(), "alice@example.com");
        assert_eq!(command.profile.first_name.as_deref(), Some("Alice"));
        assert!(command.profile.last_name.is_none());
    }

    #[test]
    fn test_request_with_bad_email() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "alice",
            "password": "pw123"
        }))
        .unwrap();

        assert!(matches!(
            request.try_into_command(),
            Err(ParseRegisterRequestError::Email(_))
        ));
    }

    #[test]
    fn test_request_with_overlong_name() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "alice@example.com",
            "password": "pw123",
            "first_name": "a".repeat(101)
        }))
        .unwrap();

        let err = ApiError::from(request.try_into_command().unwrap_err());
        assert!(matches!(err, ApiError::UnprocessableEntity(msg) if msg.contains("first_name")));
    }
}
