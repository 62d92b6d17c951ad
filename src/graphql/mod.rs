//! The combined GraphQL schema.

mod blog;
mod types;
mod user;

use std::sync::Arc;

use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::auth::SeaOrmSessionStore;
use crate::storage::{SeaOrmBlogStorage, SeaOrmUserStorage};

pub use blog::BlogQuery;
pub use types::{Blog, Tag, User};
pub use user::{AuthMutation, UserQuery};

/// Combined Query: `blogs`, `tags`, `user`, `authed`
#[derive(MergedObject, Default)]
pub struct Query(BlogQuery, UserQuery);

/// Combined Mutation: `register`, `login`, `logout`
#[derive(MergedObject, Default)]
pub struct Mutation(AuthMutation);

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the schema with the storage layer attached as schema data.
///
/// The per-request [`crate::auth::AuthSession`] is NOT attached here; the
/// HTTP layer injects it into every request's data.
pub fn build_schema(
    users: Arc<SeaOrmUserStorage>,
    blogs: Arc<SeaOrmBlogStorage>,
    sessions: Arc<SeaOrmSessionStore>,
) -> AppSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(users)
        .data(blogs)
        .data(sessions)
        .finish()
}
