//! Data Transfer Objects - form payloads and response bodies for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login form submission. `remember` selects a long-lived session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

/// Post creation form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
}

/// Comment form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub content: String,
}

/// Profile nickname form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileForm {
    pub nickname: String,
}

/// Optional sub-forum key carried in the query string of engagement routes,
/// used to pick the post-action redirect target.
#[derive(Debug, Clone, Deserialize)]
pub struct MajorQuery {
    pub major: Option<String>,
}

/// Post-login redirect target preserved across the login flow.
#[derive(Debug, Clone, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// JSON stand-in for a rendered form page: the action URL and expected fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormView {
    pub action: String,
    pub fields: Vec<String>,
}

impl FormView {
    pub fn new(action: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            action: action.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// The session token issued at login, for API clients that present it as a
/// bearer token instead of relying on the cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// One post as shown in a feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub major: Option<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub like_count: u64,
    pub comment_count: u64,
}

/// A feed of posts, optionally scoped to one sub-forum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub major: Option<String>,
    pub posts: Vec<PostSummary>,
}

/// One comment as shown under a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// A single post with its comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub major: Option<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub like_count: u64,
    pub comments: Vec<CommentResponse>,
}

/// The profile page payload: current identity plus the editable nickname.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub username: String,
    pub nickname: String,
    pub email: String,
}
