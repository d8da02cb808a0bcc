//! Student DTOs for create and update operations.

use serde::{Deserialize, Serialize};

/// DTO for creating a student record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudent {
    pub student_name: String,
    pub school_name: String,
}

/// DTO for updating a student record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStudent {
    pub student_name: Option<String>,
    pub school_name: Option<String>,
}
