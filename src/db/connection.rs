//! Database connection pool and schema bootstrap.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, PaginatorTrait};
use std::time::Duration;
use tracing::log::LevelFilter;

/// Create a new database connection with configured pool settings.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(5)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(opt).await
}

/// Create the record tables if they don't exist and seed the default
/// admin account when the users table is empty.
pub async fn init_schema(db: &DatabaseConnection) -> crate::error::Result<()> {
    db.execute_unprepared(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .await?;

    db.execute_unprepared(
        "CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_name TEXT NOT NULL,
            school_name TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .await?;

    db.execute_unprepared(
        "CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            salary_cents INTEGER NOT NULL,
            created_at TEXT NOT NULL
        )",
    )
    .await?;

    if super::user::count(db).await? == 0 {
        super::user::seed_default_admin(db).await?;
        tracing::info!("Seeded default admin account");
    }

    Ok(())
}

/// Get record counts for all tables.
pub async fn get_table_counts(db: &DatabaseConnection) -> Result<TableCounts, DbErr> {
    use crate::entities::prelude::*;
    use sea_orm::EntityTrait;

    let users = Users::find().count(db).await?;
    let students = Students::find().count(db).await?;
    let employees = Employees::find().count(db).await?;

    Ok(TableCounts {
        users,
        students,
        employees,
    })
}

/// Table record counts.
#[derive(Debug, Clone, Default)]
pub struct TableCounts {
    pub users: u64,
    pub students: u64,
    pub employees: u64,
}

#[cfg(test)]
mod tests {
    use super::super::test_support::test_db;

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let db = test_db().await;
        // Second run must not fail or re-seed.
        super::init_schema(&db).await.unwrap();
        let counts = super::get_table_counts(&db).await.unwrap();
        assert_eq!(counts.users, 1); // default admin only
        assert_eq!(counts.students, 0);
        assert_eq!(counts.employees, 0);
    }
}
