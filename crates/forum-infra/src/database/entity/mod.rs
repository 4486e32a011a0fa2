//! SeaORM entities mirroring the forum schema.

pub mod comment;
pub mod like;
pub mod post;
pub mod user;
