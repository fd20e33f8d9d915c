//! Response DTOs for the auth endpoints
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Plain confirmation body, e.g. for role creation and registration.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for `POST /api/auth/login`
///
/// The token goes into `Authorization: Bearer <token>` on later requests.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub token_type: String,
}

impl LoginResponse {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            message: "Logged in successfully.".to_string(),
            token: token.into(),
            token_type: "Bearer".to_string(),
        }
    }
}
