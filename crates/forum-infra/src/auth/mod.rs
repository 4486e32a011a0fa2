//! Authentication infrastructure: Argon2 hashing and JWT session tokens.

mod jwt;
mod password;

pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
