//! Shared test harness: an in-memory SQLite database with the schema applied
//! and the GraphQL schema built over it.

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use scribe::auth::{AuthSession, SeaOrmSessionStore};
use scribe::graphql::{build_schema, AppSchema};
use scribe::migration::Migrator;
use scribe::storage::{SeaOrmBlogStorage, SeaOrmUserStorage};

#[allow(dead_code)]
pub struct TestApp {
    pub schema: AppSchema,
    pub users: Arc<SeaOrmUserStorage>,
    pub blogs: Arc<SeaOrmBlogStorage>,
    pub sessions: Arc<SeaOrmSessionStore>,
    pub db: DatabaseConnection,
}

pub async fn test_app() -> TestApp {
    // A single connection, or each pooled connection would get its own
    // empty in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");

    let users = Arc::new(SeaOrmUserStorage::new(db.clone()));
    let blogs = Arc::new(SeaOrmBlogStorage::new(db.clone()));
    let sessions = Arc::new(SeaOrmSessionStore::new(db.clone()));
    let schema = build_schema(users.clone(), blogs.clone(), sessions.clone());

    TestApp {
        schema,
        users,
        blogs,
        sessions,
        db,
    }
}

/// Execute a query under the given session, asserting it produced no errors.
pub async fn execute(schema: &AppSchema, session: &AuthSession, query: &str) -> serde_json::Value {
    let response = schema
        .execute(async_graphql::Request::new(query).data(session.clone()))
        .await;
    assert!(
        response.errors.is_empty(),
        "unexpected errors for {query:?}: {:?}",
        response.errors
    );
    response.data.into_json().expect("response data as json")
}
