//! # Forum Infrastructure
//!
//! Concrete implementations of the ports defined in `forum-core`:
//! PostgreSQL repositories via SeaORM, Argon2 password hashing, and the
//! JWT-backed session token service.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use sea_orm::DbConn;
pub use database::{
    DatabaseConfig, PostgresCommentRepository, PostgresLikeRepository, PostgresPostRepository,
    PostgresUserRepository, connect,
};
