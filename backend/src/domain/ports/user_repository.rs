//! Driven port for user persistence.

use async_trait::async_trait;

use crate::domain::{User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The store's uniqueness constraint rejected the username.
        DuplicateUsername { username: String } =>
            "username is already registered: {username}",
    }
}

/// Record store operations over users.
///
/// Implementations must enforce username uniqueness at the storage layer and
/// report violations as [`UserPersistenceError::DuplicateUsername`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, letting the store assign its identifier.
    async fn insert(&self, username: &Username) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username match.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Every stored user in store order.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;
}
