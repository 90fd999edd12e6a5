use contracts::shared::api::{HttpMethod, AUTH_LOGIN, AUTH_LOGOUT, AUTH_ME};
use contracts::shared::error::ApiError;
use contracts::system::auth::{LoginRequest, UserEnvelope, UserInfo};
use serde_json::Value;

use crate::shared::http::send;

fn parse_user(body: Value) -> Result<UserInfo, ApiError> {
    serde_json::from_value::<UserEnvelope>(body)
        .map(UserEnvelope::into_user)
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Current user for the session cookie, or `Unauthorized`.
pub async fn get_current_user() -> Result<UserInfo, ApiError> {
    let body = send(HttpMethod::Get, AUTH_ME, None, None).await?;
    parse_user(body)
}

/// Login with email and password
pub async fn login(email: String, password: String) -> Result<UserInfo, ApiError> {
    let request = LoginRequest { email, password };
    let body = serde_json::to_value(&request).map_err(|e| ApiError::Parse(e.to_string()))?;
    let response = send(HttpMethod::Post, AUTH_LOGIN, Some(&body), None).await?;
    parse_user(response)
}

/// Logout (drops the session cookie server-side)
pub async fn logout() -> Result<(), ApiError> {
    send(HttpMethod::Post, AUTH_LOGOUT, None, None)
        .await
        .map(|_| ())
}
