//! User query and authentication mutation resolvers.

use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use super::types::User;
use crate::auth::{password, AuthSession, SeaOrmSessionStore};
use crate::error::StorageError;
use crate::storage::{NewUser, SeaOrmUserStorage, UserStorage};

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Look up a user by username. Unknown names resolve to null, not an error.
    async fn user(&self, ctx: &Context<'_>, username: String) -> Result<Option<User>> {
        let storage = ctx.data_unchecked::<Arc<SeaOrmUserStorage>>();
        match storage.get_user_by_username(&username).await {
            Ok(found) => Ok(Some(User::from(found))),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(async_graphql::Error::new(e.to_string())),
        }
    }

    /// The currently signed-in user, or null when anonymous.
    async fn authed(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let session = ctx.data_unchecked::<AuthSession>();
        Ok(session.current_user().map(User::from))
    }
}

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Create an account and sign the new user in.
    async fn register(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<User> {
        let users = ctx.data_unchecked::<Arc<SeaOrmUserStorage>>();
        let sessions = ctx.data_unchecked::<Arc<SeaOrmSessionStore>>();
        let session = ctx.data_unchecked::<AuthSession>();

        let password_hash = password::hash_password(&password)
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        // A duplicate username surfaces here as a storage error, not a null user.
        let created = users
            .create_user(NewUser {
                username,
                email: String::new(),
                first_name: String::new(),
                last_name: String::new(),
                password_hash,
            })
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        let session_id = sessions
            .open(created.id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        session.log_in(session_id, created.clone());

        Ok(User::from(created))
    }

    /// Sign in. Bad credentials resolve to null rather than an error; an
    /// unknown username and a wrong password are indistinguishable.
    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<Option<User>> {
        let users = ctx.data_unchecked::<Arc<SeaOrmUserStorage>>();
        let sessions = ctx.data_unchecked::<Arc<SeaOrmSessionStore>>();
        let session = ctx.data_unchecked::<AuthSession>();

        let found = match users.get_user_by_username(&username).await {
            Ok(found) => found,
            Err(StorageError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(async_graphql::Error::new(e.to_string())),
        };

        let verified = password::verify_password(&password, &found.password_hash)
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        if !verified {
            return Ok(None);
        }

        let session_id = sessions
            .open(found.id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        session.log_in(session_id, found.clone());

        Ok(Some(User::from(found)))
    }

    /// Sign out, returning the user that was signed in (null when anonymous).
    async fn logout(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let sessions = ctx.data_unchecked::<Arc<SeaOrmSessionStore>>();
        let session = ctx.data_unchecked::<AuthSession>();

        if let Some(id) = session.session_id() {
            sessions
                .close(&id)
                .await
                .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        }
        Ok(session.log_out().map(User::from))
    }
}
