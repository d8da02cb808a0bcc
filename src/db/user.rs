//! User repository: registration and login verification.
//!
//! Usernames are unique by constraint; passwords are stored as SHA-256
//! hex digests (see [`crate::auth`]). Accounts are never updated or
//! deleted through this tool.

use crate::auth;
use crate::entities::{prelude::*, user};
use crate::error::{AppError, Result};
use crate::models::user::CreateUser;
use chrono::Utc;
use sea_orm::*;

/// Default admin credentials seeded on first run.
const DEFAULT_ADMIN_USER: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Register a new user. The plaintext password is hashed before storage.
///
/// A duplicate username surfaces as a validation error with a friendly
/// message rather than a raw constraint failure.
pub async fn register(db: &DatabaseConnection, data: CreateUser) -> Result<user::Model> {
    let username = data.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::validation("Username is required"));
    }
    if data.password.is_empty() {
        return Err(AppError::validation("Password is required"));
    }

    if find_by_username(db, &username).await?.is_some() {
        return Err(AppError::validation(format!(
            "Username '{username}' already exists"
        )));
    }

    let model = user::ActiveModel {
        username: Set(username.clone()),
        password_hash: Set(auth::hash_password(&data.password)),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    match model.insert(db).await {
        Ok(created) => Ok(created),
        // Race with another writer on the unique index.
        Err(e) if e.to_string().contains("UNIQUE") => Err(AppError::validation(format!(
            "Username '{username}' already exists"
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Find a user by username.
pub async fn find_by_username(db: &DatabaseConnection, username: &str) -> Result<Option<user::Model>> {
    let found = Users::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    Ok(found)
}

/// Check credentials against the users table.
pub async fn verify_login(db: &DatabaseConnection, username: &str, password: &str) -> Result<bool> {
    match find_by_username(db, username).await? {
        Some(found) => Ok(auth::verify_password(password, &found.password_hash)),
        None => Ok(false),
    }
}

/// Count registered users.
pub async fn count(db: &DatabaseConnection) -> Result<u64> {
    let count = Users::find().count(db).await?;
    Ok(count)
}

/// Insert the default admin account.
pub async fn seed_default_admin(db: &DatabaseConnection) -> Result<user::Model> {
    register(
        db,
        CreateUser {
            username: DEFAULT_ADMIN_USER.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_db;

    #[tokio::test]
    async fn test_register_and_login() {
        let db = test_db().await;

        let user = register(
            &db,
            CreateUser {
                username: "alice".to_string(),
                password: "wonderland".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.password_hash.len(), 64);
        assert_ne!(user.password_hash, "wonderland");

        assert!(verify_login(&db, "alice", "wonderland").await.unwrap());
        assert!(!verify_login(&db, "alice", "wrong").await.unwrap());
        assert!(!verify_login(&db, "nobody", "wonderland").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = test_db().await;

        register(
            &db,
            CreateUser {
                username: "bob".to_string(),
                password: "one".to_string(),
            },
        )
        .await
        .unwrap();

        let err = register(
            &db,
            CreateUser {
                username: "bob".to_string(),
                password: "two".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_empty_fields_rejected() {
        let db = test_db().await;

        assert!(
            register(
                &db,
                CreateUser {
                    username: "  ".to_string(),
                    password: "pw".to_string(),
                }
            )
            .await
            .is_err()
        );

        assert!(
            register(
                &db,
                CreateUser {
                    username: "carol".to_string(),
                    password: String::new(),
                }
            )
            .await
            .is_err()
        );
    }

    #[tokio::test]
    async fn test_default_admin_can_log_in() {
        let db = test_db().await;
        assert!(verify_login(&db, "admin", "admin123").await.unwrap());
    }
}
