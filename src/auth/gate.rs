//! Authorization gate
//!
//! A pure check of an optional caller identity against a named policy.

use std::collections::HashSet;

use super::ADMIN_ROLE;

/// An authenticated caller and the roles they hold right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub email: Option<String>,
    pub roles: HashSet<String>,
}

impl Identity {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

/// A named requirement of role membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub name: &'static str,
    pub required_role: &'static str,
}

pub const ADMIN_POLICY: Policy = Policy {
    name: "Admin",
    required_role: ADMIN_ROLE,
};

/// Why a request was turned away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// No valid identity was presented.
    Unauthenticated,
    /// The identity lacks the policy's role.
    Forbidden { policy: &'static str },
}

/// Evaluates `policy` for the caller. Holds no state.
pub fn authorize(identity: Option<&Identity>, policy: &Policy) -> Result<(), Denial> {
    match identity {
        None => Err(Denial::Unauthenticated),
        Some(identity) if identity.has_role(policy.required_role) => Ok(()),
        Some(_) => Err(Denial::Forbidden {
            policy: policy.name,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(roles: &[&str]) -> Identity {
        Identity {
            username: "alice".to_string(),
            email: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_anonymous_is_unauthenticated() {
        assert_eq!(authorize(None, &ADMIN_POLICY), Err(Denial::Unauthenticated));
    }

    #[test]
    fn test_missing_role_is_forbidden() {
        let caller = identity(&["Clerk"]);
        assert_eq!(
            authorize(Some(&caller), &ADMIN_POLICY),
            Err(Denial::Forbidden { policy: "Admin" })
        );
    }

    #[test]
    fn test_admin_is_authorized() {
        let caller = identity(&["Clerk", "Admin"]);
        assert_eq!(authorize(Some(&caller), &ADMIN_POLICY), Ok(()));
    }

    #[test]
    fn test_role_match_is_case_sensitive() {
        let caller = identity(&["admin"]);
        assert!(authorize(Some(&caller), &ADMIN_POLICY).is_err());
    }
}
