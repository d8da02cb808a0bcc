//! Sea-ORM entity definitions for the record tables.

pub mod employee;
pub mod student;
pub mod user;

pub mod prelude {
    pub use super::employee::Entity as Employees;
    pub use super::student::Entity as Students;
    pub use super::user::Entity as Users;
}
