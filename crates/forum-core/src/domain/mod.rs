//! Domain entities.

mod comment;
mod like;
mod post;
mod user;

pub use comment::Comment;
pub use like::Like;
pub use post::Post;
pub use user::User;
