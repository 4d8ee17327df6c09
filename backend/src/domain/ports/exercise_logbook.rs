//! Driving port for appending to and reading exercise logs.

use async_trait::async_trait;

use crate::domain::{Error, ExerciseEntry, ExerciseLog, LogFilter, NewExercise, UserId};

/// Failures surfaced by [`ExerciseLogbook`] operations.
///
/// An unknown user is a modelled outcome rather than a transport failure, so
/// adapters can render it with the body clients expect.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LogbookError {
    /// The referenced user identifier does not resolve to a user.
    #[error("user {0} does not exist")]
    UnknownUser(UserId),
    /// Any other failure, typically from the record store.
    #[error(transparent)]
    Failed(#[from] Error),
}

/// Use-case port consumed by inbound adapters.
#[async_trait]
pub trait ExerciseLogbook: Send + Sync {
    /// Append one entry to the user's log.
    async fn append(&self, exercise: NewExercise) -> Result<ExerciseEntry, LogbookError>;

    /// Read the user's log restricted by `filter`.
    async fn query(
        &self,
        user_id: &UserId,
        filter: LogFilter,
    ) -> Result<ExerciseLog, LogbookError>;
}
