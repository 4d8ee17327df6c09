//! User directory domain service.
//!
//! Registration is find-then-create. The record store's uniqueness
//! constraint settles concurrent first registrations: the losing insert is
//! rejected and the winner's record is returned instead.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{UserDirectory, UserPersistenceError, UserRepository};
use crate::domain::{Error, User, Username};

/// User directory service implementing the [`UserDirectory`] driving port.
pub struct UserDirectoryService<R: ?Sized> {
    users: Arc<R>,
}

impl<R: ?Sized> UserDirectoryService<R> {
    /// Create a new service over the given repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R: ?Sized> Clone for UserDirectoryService<R> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict(format!("username is already registered: {username}"))
        }
    }
}

impl<R> UserDirectoryService<R>
where
    R: UserRepository + ?Sized,
{
    async fn find(&self, username: &Username) -> Result<Option<User>, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_user_persistence_error)
    }
}

#[async_trait]
impl<R> UserDirectory for UserDirectoryService<R>
where
    R: UserRepository + ?Sized,
{
    async fn register_or_fetch(&self, username: Username) -> Result<User, Error> {
        if let Some(existing) = self.find(&username).await? {
            debug!(user_id = %existing.id(), "username already registered");
            return Ok(existing);
        }

        match self.users.insert(&username).await {
            Ok(user) => {
                info!(user_id = %user.id(), username = %user.username(), "user registered");
                Ok(user)
            }
            Err(UserPersistenceError::DuplicateUsername { .. }) => {
                debug!(username = %username, "lost registration race, re-reading winner");
                self.find(&username).await?.ok_or_else(|| {
                    Error::conflict(format!("username is already registered: {username}"))
                })
            }
            Err(err) => Err(map_user_persistence_error(err)),
        }
    }

    async fn list_all(&self) -> Result<Vec<User>, Error> {
        self.users
            .list_all()
            .await
            .map_err(map_user_persistence_error)
    }
}
