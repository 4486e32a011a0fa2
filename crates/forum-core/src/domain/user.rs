use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - a registered forum member.
///
/// `username` is the unique login handle chosen at registration and never
/// changes. `nickname` is the display name shown next to posts and comments;
/// it starts equal to the username and can be changed on the profile page
/// without any uniqueness requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and creation timestamp.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            nickname: username.clone(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_defaults_nickname_to_username() {
        let user = User::new(
            "alice".to_string(),
            "alice@u.rochester.edu".to_string(),
            "hash".to_string(),
        );

        assert_eq!(user.nickname, "alice");
        assert_eq!(user.username, "alice");
    }
}
