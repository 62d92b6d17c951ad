//! Authentication: password hashing and session management.

pub mod password;
pub mod session;

pub use session::{AuthSession, SeaOrmSessionStore, SessionChange, SESSION_COOKIE};
