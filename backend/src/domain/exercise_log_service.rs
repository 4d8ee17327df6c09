//! Exercise log domain service.
//!
//! Both operations resolve the owning user first. An unresolved identifier is
//! reported as [`LogbookError::UnknownUser`] and leaves the store untouched.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ExerciseLogbook, ExercisePersistenceError, ExerciseRepository, LogbookError, UserRepository,
};
use crate::domain::user_directory_service::map_user_persistence_error;
use crate::domain::{
    Error, ExerciseDate, ExerciseDraft, ExerciseEntry, ExerciseLog, LogFilter, NewExercise, User,
    UserId,
};

/// Exercise log service implementing the [`ExerciseLogbook`] driving port.
pub struct ExerciseLogService<U: ?Sized, E: ?Sized> {
    users: Arc<U>,
    exercises: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<U: ?Sized, E: ?Sized> ExerciseLogService<U, E> {
    /// Create a new service.
    ///
    /// `clock` supplies the date recorded for entries submitted without one.
    pub fn new(users: Arc<U>, exercises: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            exercises,
            clock,
        }
    }
}

fn map_exercise_persistence_error(error: ExercisePersistenceError) -> Error {
    match error {
        ExercisePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("exercise repository unavailable: {message}"))
        }
        ExercisePersistenceError::Query { message } => {
            Error::internal(format!("exercise repository error: {message}"))
        }
    }
}

impl<U, E> ExerciseLogService<U, E>
where
    U: UserRepository + ?Sized,
    E: ExerciseRepository + ?Sized,
{
    async fn resolve_owner(&self, user_id: &UserId) -> Result<User, LogbookError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or(LogbookError::UnknownUser(*user_id))
    }

    fn today(&self) -> ExerciseDate {
        ExerciseDate::from_naive(self.clock.local().date_naive())
    }
}

#[async_trait]
impl<U, E> ExerciseLogbook for ExerciseLogService<U, E>
where
    U: UserRepository + ?Sized,
    E: ExerciseRepository + ?Sized,
{
    async fn append(&self, exercise: NewExercise) -> Result<ExerciseEntry, LogbookError> {
        let owner = self.resolve_owner(&exercise.user_id).await?;
        let date = exercise.date.unwrap_or_else(|| self.today());
        let draft = ExerciseDraft::for_user(&owner, exercise, date);

        let entry = self
            .exercises
            .insert(&draft)
            .await
            .map_err(map_exercise_persistence_error)?;
        info!(
            user_id = %entry.user_id,
            exercise_id = %entry.id,
            duration = entry.duration.get(),
            "exercise logged"
        );
        Ok(entry)
    }

    async fn query(
        &self,
        user_id: &UserId,
        filter: LogFilter,
    ) -> Result<ExerciseLog, LogbookError> {
        let user = self.resolve_owner(user_id).await?;
        let entries = self
            .exercises
            .list_for_user(user.id(), &filter)
            .await
            .map_err(map_exercise_persistence_error)?;
        Ok(ExerciseLog { user, entries })
    }
}
