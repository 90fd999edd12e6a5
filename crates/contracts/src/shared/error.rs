use serde::Deserialize;
use thiserror::Error;

use crate::shared::api::is_auth_exempt;

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Your session has expired. Please log in again.")]
    Unauthorized,
    #[error("You do not have access to this feature.")]
    Forbidden,
    #[error("{message}")]
    Request { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Request was cancelled")]
    Aborted,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    /// Build the error for a non-2xx response from its status and raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            _ => Self::Request {
                status,
                message: extract_error_message(body),
            },
        }
    }

    /// Like [`Self::from_status`], but a 401 from the login, logout or
    /// current-user endpoints is a plain failure carrying the server's
    /// message. Those calls never start the session-expiry flow.
    pub fn from_response(path: &str, status: u16, body: &str) -> Self {
        if status == 401 && is_auth_exempt(path) {
            return Self::Request {
                status,
                message: extract_error_message(body),
            };
        }
        Self::from_status(status, body)
    }

    /// Errors that must not be shown next to the control that triggered them.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Aborted | Self::Unauthorized)
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// `{message}` JSON body, else the raw text, else a generic fallback.
pub fn extract_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if parsed.message.trim().is_empty() {
            return GENERIC_ERROR_MESSAGE.to_string();
        }
        return parsed.message;
    }
    let raw = body.trim();
    if raw.is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_json_body() {
        let err = ApiError::from_status(400, r#"{"message":"Bed 12 is occupied"}"#);
        assert_eq!(err.to_string(), "Bed 12 is occupied");
    }

    #[test]
    fn test_message_falls_back_to_raw_text() {
        let err = ApiError::from_status(500, "Internal Server Error");
        assert_eq!(
            err,
            ApiError::Request {
                status: 500,
                message: "Internal Server Error".into()
            }
        );
    }

    #[test]
    fn test_message_falls_back_to_generic() {
        assert_eq!(extract_error_message("   "), GENERIC_ERROR_MESSAGE);
        assert_eq!(extract_error_message(r#"{"message":""}"#), GENERIC_ERROR_MESSAGE);
        assert_eq!(extract_error_message(r#"{"message":"  "}"#), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_auth_statuses() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403, "nope"), ApiError::Forbidden);
        assert!(ApiError::Unauthorized.is_silent());
        assert!(!ApiError::Forbidden.is_silent());
    }

    #[test]
    fn test_login_401_keeps_server_message() {
        let body = r#"{"message":"Incorrect email or password"}"#;
        let err = ApiError::from_response("/user/login", 401, body);
        assert_eq!(
            err,
            ApiError::Request {
                status: 401,
                message: "Incorrect email or password".into()
            }
        );
        assert_eq!(
            format!("Login failed: {}", err),
            "Login failed: Incorrect email or password"
        );
        assert!(!err.is_silent());
    }

    #[test]
    fn test_resource_401_is_session_expiry() {
        assert_eq!(
            ApiError::from_response("/expense?page=1", 401, r#"{"message":"jwt expired"}"#),
            ApiError::Unauthorized
        );
        assert_eq!(ApiError::from_response("/expense", 403, ""), ApiError::Forbidden);
    }
}
