//! Database connection and repositories.

pub mod connection;
pub mod employee;
pub mod student;
pub mod user;

pub use connection::{TableCounts, connect, get_table_counts, init_schema};

#[cfg(test)]
pub(crate) mod test_support {
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};

    /// Fresh in-memory database with the schema applied.
    ///
    /// Pinned to a single connection so every query sees the same
    /// in-memory file.
    pub async fn test_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1);
        let db = Database::connect(opt).await.expect("connect in-memory db");
        super::init_schema(&db).await.expect("init schema");
        db
    }
}
