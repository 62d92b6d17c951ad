//! Session management.
//!
//! Sessions are rows in the `sessions` table keyed by a random UUID; the
//! id is the value of the `sessionid` cookie. Each request gets an
//! [`AuthSession`] handle in GraphQL context data: resolvers read the
//! current user from it, and login/logout record a pending cookie change
//! that the HTTP layer applies after execution.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};
use uuid::Uuid;

use crate::entity::{session, user};
use crate::error::StorageError;

/// Name of the session cookie, shared with the HTTP layer.
pub const SESSION_COOKIE: &str = "sessionid";

/// Default session lifetime: 14 days.
pub const DEFAULT_TTL: Duration = Duration::from_secs(14 * 24 * 60 * 60);

/// Database-backed session store.
pub struct SeaOrmSessionStore {
    db: DatabaseConnection,
    ttl: Duration,
}

impl SeaOrmSessionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_ttl(db, DEFAULT_TTL)
    }

    pub fn with_ttl(db: DatabaseConnection, ttl: Duration) -> Self {
        Self { db, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open a session for a user and return its id.
    pub async fn open(&self, user_id: i32) -> Result<String, StorageError> {
        let now = Utc::now();
        let model = session::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id),
            created_at: Set(now),
            expires_at: Set(now + chrono::Duration::seconds(self.ttl.as_secs() as i64)),
        };
        let model = model.insert(&self.db).await?;
        Ok(model.id)
    }

    /// Resolve a session id to its user. Unknown or expired ids are `None`;
    /// expired rows are deleted on the way out.
    pub async fn resolve(&self, id: &str) -> Result<Option<user::Model>, StorageError> {
        let Some(found) = session::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        if found.expires_at <= Utc::now() {
            found.delete(&self.db).await?;
            return Ok(None);
        }
        Ok(found.find_related(user::Entity).one(&self.db).await?)
    }

    /// Destroy a session, if it exists.
    pub async fn close(&self, id: &str) -> Result<(), StorageError> {
        session::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

/// Pending change to the client's session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    LoggedIn { session_id: String },
    LoggedOut,
}

/// Per-request authentication context.
///
/// Cloning is cheap; all clones share state. The inner lock is never held
/// across an await point.
#[derive(Clone, Default)]
pub struct AuthSession {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    session_id: Option<String>,
    user: Option<user::Model>,
    change: Option<SessionChange>,
}

impl AuthSession {
    /// A request with no (valid) session cookie.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A request whose cookie resolved to a signed-in user.
    pub fn authenticated(session_id: String, user: user::Model) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                session_id: Some(session_id),
                user: Some(user),
                change: None,
            })),
        }
    }

    pub fn current_user(&self) -> Option<user::Model> {
        self.lock().user.clone()
    }

    pub fn session_id(&self) -> Option<String> {
        self.lock().session_id.clone()
    }

    /// Record a successful login.
    pub fn log_in(&self, session_id: String, user: user::Model) {
        let mut inner = self.lock();
        inner.user = Some(user);
        inner.session_id = Some(session_id.clone());
        inner.change = Some(SessionChange::LoggedIn { session_id });
    }

    /// Record a logout, returning the user that was signed in.
    pub fn log_out(&self) -> Option<user::Model> {
        let mut inner = self.lock();
        inner.session_id = None;
        inner.change = Some(SessionChange::LoggedOut);
        inner.user.take()
    }

    /// Take the pending cookie change, leaving none behind.
    pub fn take_change(&self) -> Option<SessionChange> {
        self.lock().change.take()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
