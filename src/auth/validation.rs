//! Registration validation
//!
//! Username and password rules applied before a user is created. Every
//! failing rule is reported, not just the first.

use serde::Serialize;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// One failed rule, serialized as `{ "code": ..., "description": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityError {
    pub code: String,
    pub description: String,
}

impl IdentityError {
    pub fn new(code: &str, description: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            description: description.into(),
        }
    }
}

pub fn validate_username(username: &str) -> Vec<IdentityError> {
    let mut errors = Vec::new();

    if username.trim().is_empty() {
        errors.push(IdentityError::new(
            "InvalidUserName",
            "Username is required.",
        ));
    } else if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-._@+".contains(c))
    {
        errors.push(IdentityError::new(
            "InvalidUserName",
            format!(
                "Username '{}' is invalid, can only contain letters or digits.",
                username
            ),
        ));
    }

    errors
}

pub fn validate_email(email: &str) -> Vec<IdentityError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };

    if valid {
        Vec::new()
    } else {
        vec![IdentityError::new(
            "InvalidEmail",
            format!("Email '{}' is invalid.", email),
        )]
    }
}

pub fn validate_password(password: &str) -> Vec<IdentityError> {
    let mut errors = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(IdentityError::new(
            "PasswordTooShort",
            format!(
                "Passwords must be at least {} characters.",
                MIN_PASSWORD_LENGTH
            ),
        ));
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        errors.push(IdentityError::new(
            "PasswordRequiresNonAlphanumeric",
            "Passwords must have at least one non alphanumeric character.",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(IdentityError::new(
            "PasswordRequiresDigit",
            "Passwords must have at least one digit ('0'-'9').",
        ));
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        errors.push(IdentityError::new(
            "PasswordRequiresLower",
            "Passwords must have at least one lowercase ('a'-'z').",
        ));
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        errors.push(IdentityError::new(
            "PasswordRequiresUpper",
            "Passwords must have at least one uppercase ('A'-'Z').",
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(errors: &[IdentityError]) -> Vec<&str> {
        errors.iter().map(|e| e.code.as_str()).collect()
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("Pa55word!").is_empty());
    }

    #[test]
    fn test_weak_password_reports_every_rule() {
        let errors = validate_password("abc");
        assert_eq!(
            codes(&errors),
            vec![
                "PasswordTooShort",
                "PasswordRequiresNonAlphanumeric",
                "PasswordRequiresDigit",
                "PasswordRequiresUpper"
            ]
        );
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice.admin@example.com").is_empty());
        assert_eq!(codes(&validate_username("  ")), vec!["InvalidUserName"]);
        assert_eq!(codes(&validate_username("bad name")), vec!["InvalidUserName"]);
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("ops@logitrack.io").is_empty());
        assert_eq!(codes(&validate_email("ops.logitrack.io")), vec!["InvalidEmail"]);
        assert_eq!(codes(&validate_email("@logitrack.io")), vec!["InvalidEmail"]);
    }
}
