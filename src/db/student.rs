//! Student repository with CRUD operations.

use crate::entities::{prelude::*, student};
use crate::models::student::{CreateStudent, UpdateStudent};
use chrono::Utc;
use sea_orm::*;

/// List all students ordered by id.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<student::Model>, DbErr> {
    Students::find().order_by_asc(student::Column::Id).all(db).await
}

/// Get student by ID.
pub async fn get_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<student::Model>, DbErr> {
    Students::find_by_id(id).one(db).await
}

/// Create a new student record.
pub async fn create(db: &DatabaseConnection, data: CreateStudent) -> Result<student::Model, DbErr> {
    let model = student::ActiveModel {
        student_name: Set(data.student_name),
        school_name: Set(data.school_name),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    model.insert(db).await
}

/// Update an existing student record.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    data: UpdateStudent,
) -> Result<Option<student::Model>, DbErr> {
    let existing = Students::find_by_id(id).one(db).await?;

    match existing {
        Some(model) => {
            let mut active: student::ActiveModel = model.into();

            if let Some(student_name) = data.student_name {
                active.student_name = Set(student_name);
            }
            if let Some(school_name) = data.school_name {
                active.school_name = Set(school_name);
            }

            let updated = active.update(db).await?;
            Ok(Some(updated))
        }
        None => Ok(None),
    }
}

/// Delete a student record by ID.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let result = Students::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_db;

    #[tokio::test]
    async fn test_crud_round_trip() {
        let db = test_db().await;

        // insert
        let created = create(
            &db,
            CreateStudent {
                student_name: "Dana".to_string(),
                school_name: "Northside High".to_string(),
            },
        )
        .await
        .unwrap();

        // read
        let fetched = get_by_id(&db, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.student_name, "Dana");
        assert_eq!(fetched.school_name, "Northside High");

        // update
        let updated = update(
            &db,
            created.id,
            UpdateStudent {
                student_name: None,
                school_name: Some("Southside High".to_string()),
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.student_name, "Dana");
        assert_eq!(updated.school_name, "Southside High");

        // read again
        let fetched = get_by_id(&db, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.school_name, "Southside High");

        // delete
        assert!(delete(&db, created.id).await.unwrap());

        // absent
        assert!(get_by_id(&db, created.id).await.unwrap().is_none());
        assert!(list_all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let db = test_db().await;
        assert!(!delete(&db, 999).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let db = test_db().await;
        let result = update(&db, 999, UpdateStudent::default()).await.unwrap();
        assert!(result.is_none());
    }
}
