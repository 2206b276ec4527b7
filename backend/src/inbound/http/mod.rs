//! HTTP inbound adapter serving the blog pages as JSON view models.

pub mod auth;
pub mod cache_control;
pub mod error;
pub mod feeds;
pub mod follows;
pub mod health;
pub mod not_found;
pub mod posts;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
