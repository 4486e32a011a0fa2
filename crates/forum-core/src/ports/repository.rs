use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Like, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining the CRUD operations every entity needs.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    ///
    /// A unique-index collision surfaces as [`RepoError::Constraint`].
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Dependent rows are removed by the
    /// storage-level cascade rules.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address (login key).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Find a user by their unique login username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Update the display nickname of an existing user.
    async fn update_nickname(&self, id: Uuid, nickname: &str) -> Result<User, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts newest-first, optionally filtered to one "major" sub-forum.
    async fn list_recent(&self, major: Option<&str>) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments on a post, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Number of comments on a post.
    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError>;
}

/// Like repository.
#[async_trait]
pub trait LikeRepository: BaseRepository<Like, Uuid> {
    /// The like row for one (user, post) pair, if any. The unique index
    /// guarantees there is at most one.
    async fn find_by_user_and_post(
        &self,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<Option<Like>, RepoError>;

    /// Number of likes on a post, computed on demand.
    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError>;
}
