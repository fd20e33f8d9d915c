//! Request DTOs for the auth endpoints
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for `POST /api/auth/register`
///
/// # Fields
/// - `username`: Login name, unique across users
/// - `email`: Optional contact address
/// - `password`: Plaintext password, hashed before storage
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(alias = "Username")]
    pub username: String,
    #[serde(default, alias = "Email")]
    pub email: Option<String>,
    #[serde(alias = "Password")]
    pub password: String,
}

/// Request body for `POST /api/auth/login`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(alias = "Username")]
    pub username: String,
    #[serde(alias = "Password")]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_deserialize() {
        let json = r#"{"username": "alice", "email": "alice@example.com", "password": "S3cret!"}"#;
        let req: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.username, "alice");
        assert_eq!(req.email.as_deref(), Some("alice@example.com"));
        assert_eq!(req.password, "S3cret!");
    }

    #[test]
    fn test_register_request_pascal_case() {
        let json = r#"{"Username": "bob", "Password": "Pa55word!"}"#;
        let req: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.username, "bob");
        assert!(req.email.is_none());
    }

    #[test]
    fn test_login_request_missing_password() {
        let json = r#"{"username": "alice"}"#;
        assert!(serde_json::from_str::<LoginRequest>(json).is_err());
    }
}
