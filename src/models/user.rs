//! User DTOs for registration.

use serde::{Deserialize, Serialize};

/// DTO for registering a user. Carries the plaintext password only until
/// the repository hashes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
}
