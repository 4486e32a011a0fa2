use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a forum post, optionally scoped to a "major" sub-forum.
///
/// Posts are immutable after creation; there is no edit path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub major: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn new(user_id: Uuid, title: String, content: String, major: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            content,
            major,
            created_at: Utc::now(),
        }
    }
}
