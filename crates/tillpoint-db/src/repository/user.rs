//! # Staff User Repository
//!
//! Database operations for staff users. Passwords arrive here already
//! hashed; this layer never sees plaintext.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tillpoint_core::{NewUser, User};

/// Repository for staff user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Lists all staff users.
    pub async fn find_all(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, username, password_hash, role
            FROM users
            ORDER BY username, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Gets a user by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, username, password_hash, role
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by username. Used by login and the uniqueness check.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, username, password_hash, role
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Checks whether a user with the given id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(found != 0)
    }

    /// Inserts a new staff user and returns it with its generated id.
    pub async fn insert(&self, new: &NewUser) -> DbResult<User> {
        debug!(username = %new.username, role = new.role.as_str(), "Inserting user");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (first_name, last_name, username, password_hash, role)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.username)
        .bind(&new.password_hash)
        .bind(new.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(User {
            id,
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            username: new.username.clone(),
            password_hash: new.password_hash.clone(),
            role: new.role,
        })
    }

    /// Updates an existing staff user, replacing every column including
    /// the stored password hash.
    pub async fn update(&self, id: i64, user: &NewUser) -> DbResult<()> {
        debug!(id, "Updating user");

        let result = sqlx::query(
            r#"
            UPDATE users
            SET first_name = ?2, last_name = ?3, username = ?4,
                password_hash = ?5, role = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Deletes a staff user. Fails with a foreign key violation when the
    /// user has created bills.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }
}
