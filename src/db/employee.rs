//! Employee repository with CRUD operations.

use crate::entities::{employee, prelude::*};
use crate::models::employee::{CreateEmployee, UpdateEmployee};
use chrono::Utc;
use sea_orm::*;

/// List all employees ordered by id.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<employee::Model>, DbErr> {
    Employees::find().order_by_asc(employee::Column::Id).all(db).await
}

/// Get employee by ID.
pub async fn get_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<employee::Model>, DbErr> {
    Employees::find_by_id(id).one(db).await
}

/// Create a new employee record.
pub async fn create(db: &DatabaseConnection, data: CreateEmployee) -> Result<employee::Model, DbErr> {
    let model = employee::ActiveModel {
        name: Set(data.name),
        age: Set(data.age),
        salary_cents: Set(data.salary_cents),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    model.insert(db).await
}

/// Update an existing employee record.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    data: UpdateEmployee,
) -> Result<Option<employee::Model>, DbErr> {
    let existing = Employees::find_by_id(id).one(db).await?;

    match existing {
        Some(model) => {
            let mut active: employee::ActiveModel = model.into();

            if let Some(name) = data.name {
                active.name = Set(name);
            }
            if let Some(age) = data.age {
                active.age = Set(age);
            }
            if let Some(salary_cents) = data.salary_cents {
                active.salary_cents = Set(salary_cents);
            }

            let updated = active.update(db).await?;
            Ok(Some(updated))
        }
        None => Ok(None),
    }
}

/// Delete an employee record by ID.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let result = Employees::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_db;

    #[tokio::test]
    async fn test_crud_round_trip() {
        let db = test_db().await;

        let created = create(
            &db,
            CreateEmployee {
                name: "Evan".to_string(),
                age: 41,
                salary_cents: 550_000,
            },
        )
        .await
        .unwrap();

        let fetched = get_by_id(&db, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.age, 41);
        assert_eq!(fetched.salary_display(), "5500.00");

        let updated = update(
            &db,
            created.id,
            UpdateEmployee {
                salary_cents: Some(600_000),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.salary_cents, 600_000);
        assert_eq!(updated.name, "Evan");

        assert!(delete(&db, created.id).await.unwrap());
        assert!(get_by_id(&db, created.id).await.unwrap().is_none());
    }
}
