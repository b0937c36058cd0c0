pub mod access;
pub mod dashboard;
pub mod health;
pub mod matrix;
pub mod permissions;
pub mod roles;
pub mod users;
