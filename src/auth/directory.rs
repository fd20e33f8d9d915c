//! User directory
//!
//! Credential and role store: users, their password hashes and role
//! memberships, plus the set of roles that have been created. Lookups are
//! served from memory; with a database attached every change is written
//! through before it becomes visible.

use std::collections::{HashMap, HashSet};

use sqlx::sqlite::SqlitePool;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::password::{hash_password_async, verify_password_async};
use super::user_tables::UserTables;
use super::validation::{validate_email, validate_password, validate_username, IdentityError};
use super::{AuthError, Identity};
use crate::store::StoreResult;

#[derive(Debug, Clone)]
pub(super) struct UserRecord {
    pub(super) id: Uuid,
    pub(super) username: String,
    pub(super) email: Option<String>,
    pub(super) password_hash: String,
    pub(super) roles: HashSet<String>,
}

impl UserRecord {
    fn identity(&self) -> Identity {
        Identity {
            username: self.username.clone(),
            email: self.email.clone(),
            roles: self.roles.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct Directory {
    pub(super) roles: HashSet<String>,
    /// Keyed by normalized (lowercased) username.
    pub(super) users: HashMap<String, UserRecord>,
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    inner: RwLock<Directory>,
    /// Write-through target, absent for a process-local directory
    tables: Option<UserTables>,
}

fn normalize(username: &str) -> String {
    username.trim().to_lowercase()
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every user and role stored in `pool`, creating the tables on
    /// first use.
    pub async fn persistent(pool: SqlitePool) -> StoreResult<Self> {
        let tables = UserTables::open(pool).await?;
        let directory = tables.load().await?;
        info!(
            users = directory.users.len(),
            roles = directory.roles.len(),
            "user directory loaded"
        );

        Ok(Self {
            inner: RwLock::new(directory),
            tables: Some(tables),
        })
    }

    // == Roles ==
    /// Creates the role if missing. Returns `true` when it was created.
    pub async fn ensure_role(&self, role: &str) -> Result<bool, AuthError> {
        let mut directory = self.inner.write().await;
        if directory.roles.contains(role) {
            return Ok(false);
        }

        if let Some(tables) = &self.tables {
            tables.insert_role(role).await?;
        }
        directory.roles.insert(role.to_string());
        info!(role, "role created");

        Ok(true)
    }

    // == Users ==
    /// Validates and stores a new user with a hashed password.
    pub async fn create_user(
        &self,
        username: &str,
        email: Option<&str>,
        password: &str,
    ) -> Result<Uuid, AuthError> {
        let mut errors = validate_username(username);
        if let Some(email) = email {
            errors.extend(validate_email(email));
        }
        errors.extend(validate_password(password));

        let key = normalize(username);
        if self.inner.read().await.users.contains_key(&key) {
            errors.push(IdentityError::new(
                "DuplicateUserName",
                format!("Username '{}' is already taken.", username),
            ));
        }

        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let password_hash = hash_password_async(password).await?;
        let record = UserRecord {
            id: Uuid::new_v4(),
            username: username.trim().to_string(),
            email: email.map(str::to_string),
            password_hash,
            roles: HashSet::new(),
        };
        let id = record.id;

        // Re-check under the write lock: another registration may have won.
        let mut directory = self.inner.write().await;
        if directory.users.contains_key(&key) {
            return Err(AuthError::Validation(vec![IdentityError::new(
                "DuplicateUserName",
                format!("Username '{}' is already taken.", username),
            )]));
        }
        if let Some(tables) = &self.tables {
            tables.insert_user(&key, &record).await?;
        }
        directory.users.insert(key, record);
        info!(username, user_id = %id, "user created");

        Ok(id)
    }

    /// Grants `role` to an existing user. The role must have been created.
    pub async fn add_to_role(&self, username: &str, role: &str) -> Result<(), AuthError> {
        let mut directory = self.inner.write().await;

        if !directory.roles.contains(role) {
            return Err(AuthError::Validation(vec![IdentityError::new(
                "InvalidRoleName",
                format!("Role name '{}' is invalid.", role),
            )]));
        }

        let Some(user) = directory.users.get_mut(&normalize(username)) else {
            return Err(AuthError::Validation(vec![IdentityError::new(
                "InvalidUserName",
                format!("User '{}' does not exist.", username),
            )]));
        };

        if user.roles.contains(role) {
            return Err(AuthError::Validation(vec![IdentityError::new(
                "UserAlreadyInRole",
                format!("User already in role '{}'.", role),
            )]));
        }

        if let Some(tables) = &self.tables {
            tables.grant_role(user.id, role).await?;
        }
        user.roles.insert(role.to_string());
        debug!(username, role, "role granted");

        Ok(())
    }

    /// Checks a username/password pair.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        let record = self
            .inner
            .read()
            .await
            .users
            .get(&normalize(username))
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password_async(password, &record.password_hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(record.identity())
    }

    /// Current identity for `username`, with roles as they are right now.
    pub async fn identity(&self, username: &str) -> Option<Identity> {
        self.inner
            .read()
            .await
            .users
            .get(&normalize(username))
            .map(UserRecord::identity)
    }
}
