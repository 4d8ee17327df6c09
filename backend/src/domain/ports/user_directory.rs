//! Driving port for registering and listing users.

use async_trait::async_trait;

use crate::domain::{Error, User, Username};

/// Use-case port consumed by inbound adapters.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return the user registered under `username`, creating it on first use.
    ///
    /// Repeated calls with the same username return the same identifier.
    async fn register_or_fetch(&self, username: Username) -> Result<User, Error>;

    /// Every registered user.
    async fn list_all(&self) -> Result<Vec<User>, Error>;
}
