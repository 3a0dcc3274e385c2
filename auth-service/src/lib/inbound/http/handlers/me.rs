use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn me(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .auth_service
        .profile(&authenticated.email)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
