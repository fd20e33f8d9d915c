//! SQLite tables behind the user directory
//!
//! Users, roles and role grants live next to `orders` and `inventoryItems` in
//! the same database. The directory loads them once and writes every change
//! through.

use std::collections::HashMap;

use sqlx::sqlite::SqlitePool;
use sqlx::{query, query_as};
use uuid::Uuid;

use super::directory::{Directory, UserRecord};
use crate::store::{StoreError, StoreResult};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS roles (name TEXT PRIMARY KEY)",
    r#"
    CREATE TABLE IF NOT EXISTS users (
        userId TEXT PRIMARY KEY,
        userName TEXT NOT NULL,
        normalizedUserName TEXT NOT NULL UNIQUE,
        email TEXT NULL,
        passwordHash TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS userRoles (
        userId TEXT NOT NULL REFERENCES users (userId) ON DELETE CASCADE,
        roleName TEXT NOT NULL REFERENCES roles (name) ON DELETE CASCADE,
        PRIMARY KEY (userId, roleName)
    )
    "#,
];

type UserRow = (String, String, String, Option<String>, String);

#[derive(Debug, Clone)]
pub(super) struct UserTables {
    pool: SqlitePool,
}

impl UserTables {
    /// Creates the tables if they are missing.
    pub(super) async fn open(pool: SqlitePool) -> StoreResult<Self> {
        for statement in SCHEMA {
            query(*statement).execute(&pool).await?;
        }
        Ok(Self { pool })
    }

    /// Reads every role, user and grant into a fresh directory.
    pub(super) async fn load(&self) -> StoreResult<Directory> {
        let roles: Vec<(String,)> = query_as("SELECT name FROM roles")
            .fetch_all(&self.pool)
            .await?;
        let users: Vec<UserRow> = query_as(
            "SELECT userId, userName, normalizedUserName, email, passwordHash FROM users",
        )
        .fetch_all(&self.pool)
        .await?;
        let grants: Vec<(String, String)> = query_as("SELECT userId, roleName FROM userRoles")
            .fetch_all(&self.pool)
            .await?;

        let mut directory = Directory::default();
        directory.roles.extend(roles.into_iter().map(|(name,)| name));

        let mut key_by_id = HashMap::with_capacity(users.len());
        for (user_id, username, key, email, password_hash) in users {
            let id = Uuid::parse_str(&user_id).map_err(|err| {
                StoreError::Unavailable(format!("corrupt user id '{}': {}", user_id, err))
            })?;
            key_by_id.insert(user_id, key.clone());
            directory.users.insert(
                key,
                UserRecord {
                    id,
                    username,
                    email,
                    password_hash,
                    roles: Default::default(),
                },
            );
        }

        for (user_id, role) in grants {
            if let Some(user) = key_by_id
                .get(&user_id)
                .and_then(|key| directory.users.get_mut(key))
            {
                user.roles.insert(role);
            }
        }

        Ok(directory)
    }

    pub(super) async fn insert_role(&self, role: &str) -> StoreResult<()> {
        query("INSERT OR IGNORE INTO roles (name) VALUES (?)")
            .bind(role)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub(super) async fn insert_user(&self, key: &str, record: &UserRecord) -> StoreResult<()> {
        query(
            "INSERT INTO users (userId, userName, normalizedUserName, email, passwordHash) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(&record.username)
        .bind(key)
        .bind(&record.email)
        .bind(&record.password_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub(super) async fn grant_role(&self, user_id: Uuid, role: &str) -> StoreResult<()> {
        query("INSERT OR IGNORE INTO userRoles (userId, roleName) VALUES (?, ?)")
            .bind(user_id.to_string())
            .bind(role)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
