//! User credential entity.
//!
//! | Column        | Type                | Description                    |
//! |---------------|---------------------|--------------------------------|
//! | id            | INTEGER (PK)        | Row id                         |
//! | username      | TEXT UNIQUE         | Login name                     |
//! | password_hash | TEXT                | Hex SHA-256 of the password    |
//! | created_at    | TEXT (RFC 3339)     | Registration timestamp (UTC)   |

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
