//! SeaORM entity definitions for the blogging data model.

pub mod blog;
pub mod blog_tag;
pub mod session;
pub mod tag;
pub mod user;
