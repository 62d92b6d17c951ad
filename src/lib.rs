//! Scribe: a minimal GraphQL blogging backend.
//!
//! User accounts with session-based authentication, blog posts with tags,
//! and a single GraphQL endpoint exposing both. A thin layer over SeaORM
//! for storage and async-graphql for the API surface.
//!
//! # Layout
//!
//! - [`entity`] - SeaORM entity definitions
//! - [`migration`] - schema migrations
//! - [`storage`] - storage traits and SeaORM implementations
//! - [`auth`] - password hashing and sessions
//! - [`graphql`] - the Query/Mutation schema
//! - [`server`] - the axum router

pub mod auth;
pub mod entity;
pub mod error;
pub mod graphql;
pub mod migration;
pub mod server;
pub mod storage;
