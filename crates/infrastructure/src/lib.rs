//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod demo_directory;
mod http_directory_client;
mod in_memory_directory_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use demo_directory::{DEMO_ADMIN_EMAIL, DEMO_PERMISSIONS, seed_demo_directory};
pub use http_directory_client::{HttpDirectoryClient, HttpDirectoryClientConfig};
pub use in_memory_directory_repository::InMemoryDirectoryRepository;
