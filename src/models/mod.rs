//! Data transfer objects for users, students, and employees.

pub mod employee;
pub mod student;
pub mod user;

pub use employee::{CreateEmployee, UpdateEmployee};
pub use student::{CreateStudent, UpdateStudent};
pub use user::CreateUser;
