//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each repository implements one driven port from [`crate::domain::ports`]
//! over a shared `bb8` pool of `diesel-async` connections.
//!
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private; only domain types cross the module boundary.
//! - Stored rows are re-validated into domain types on load.
//! - Database errors are mapped to each port's persistence error.
//!
//! # Example
//!
//! ```ignore
//! use blog::outbound::persistence::{DbPool, DieselPostRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/blog")).await?;
//! let posts = DieselPostRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_comment_repository;
mod diesel_follow_repository;
mod diesel_group_repository;
mod diesel_login_service;
mod diesel_post_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod password;
mod pool;
mod row_mapping;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_follow_repository::DieselFollowRepository;
pub use diesel_group_repository::DieselGroupRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use password::{PasswordHashError, hash_password, verify_password};
pub use pool::{DbPool, PoolConfig, PoolError};
