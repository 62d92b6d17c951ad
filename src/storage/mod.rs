//! Storage traits and their SeaORM implementations.
//!
//! Each aggregate gets a trait describing its operations and a
//! `SeaOrm*Storage` struct implementing it against a database connection.

mod blog;
mod user;

pub use blog::{BlogStorage, BlogWithTags, NewBlog, SeaOrmBlogStorage};
pub use user::{NewUser, SeaOrmUserStorage, UserStorage};
