//! Application state - shared across all handlers.

use std::sync::Arc;

use forum_core::ports::{
    CommentRepository, LikeRepository, PasswordService, PostRepository, TokenService,
    UserRepository,
};
use forum_infra::{
    Argon2PasswordService, DbConn, JwtTokenService, PostgresCommentRepository,
    PostgresLikeRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state: one repository handle per entity plus the
/// authentication collaborators, all behind trait objects so tests can swap
/// in doubles.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub tokens: Arc<dyn TokenService>,
    pub allowed_email_domain: String,
}

impl AppState {
    /// Build the production state backed by PostgreSQL repositories.
    pub fn postgres(db: DbConn, config: &AppConfig) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            likes: Arc::new(PostgresLikeRepository::new(db)),
            passwords: Arc::new(Argon2PasswordService::new()),
            tokens: Arc::new(JwtTokenService::from_env()),
            allowed_email_domain: config.allowed_email_domain.clone(),
        }
    }
}
