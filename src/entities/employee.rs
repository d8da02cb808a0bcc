//! Employee record entity.
//!
//! Salary is stored in cents to avoid floating point drift in totals.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub salary_cents: i64,
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Salary formatted as a decimal string, e.g. `1234.50`.
    pub fn salary_display(&self) -> String {
        format!("{}.{:02}", self.salary_cents / 100, self.salary_cents % 100)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_salary_display() {
        let emp = Model {
            id: 1,
            name: "Test".to_string(),
            age: 30,
            salary_cents: 123_450,
            created_at: Utc::now(),
        };
        assert_eq!(emp.salary_display(), "1234.50");
    }
}
