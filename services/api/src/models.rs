//! Domain models stored in the document store

pub mod employee;
pub mod user;

pub use employee::{
    Employee, EmployeeFields, EmployeeFilter, Gender, MIN_SALARY, NewEmployee, UpdateEmployee,
};
pub use user::{NewUser, User};
