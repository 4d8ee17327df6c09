//! Driven port for exercise entry persistence.

use async_trait::async_trait;

use crate::domain::{ExerciseDraft, ExerciseEntry, LogFilter, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by exercise repository adapters.
    pub enum ExercisePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "exercise repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "exercise repository query failed: {message}",
    }
}

/// Append-only record store operations over exercise entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Append an entry, letting the store assign its identifier.
    async fn insert(
        &self,
        draft: &ExerciseDraft,
    ) -> Result<ExerciseEntry, ExercisePersistenceError>;

    /// Entries owned by `user_id` in insertion order, restricted by `filter`.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &LogFilter,
    ) -> Result<Vec<ExerciseEntry>, ExercisePersistenceError>;
}
