//! PostgreSQL-backed `ExerciseRepository` implementation using Diesel ORM.
//!
//! Entries are read back in `seq` order, the identity column recording
//! insertion order. Range and limit are applied in SQL.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ExercisePersistenceError, ExerciseRepository};
use crate::domain::{
    Description, ExerciseDate, ExerciseDraft, ExerciseEntry, ExerciseId, LogFilter, Minutes,
    UserId, Username,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ExerciseRow, NewExerciseRow};
use super::pool::{DbPool, PoolError};
use super::schema::exercises;

/// Diesel-backed implementation of the [`ExerciseRepository`] port.
#[derive(Clone)]
pub struct DieselExerciseRepository {
    pool: DbPool,
}

impl DieselExerciseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ExercisePersistenceError {
    map_pool_error(error, ExercisePersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ExercisePersistenceError {
    map_diesel_error(
        error,
        ExercisePersistenceError::query,
        ExercisePersistenceError::connection,
    )
}

fn duration_for_db(duration: Minutes) -> Result<i32, ExercisePersistenceError> {
    i32::try_from(duration.get())
        .map_err(|_| ExercisePersistenceError::query("duration exceeds column range"))
}

fn row_to_entry(row: ExerciseRow) -> Result<ExerciseEntry, ExercisePersistenceError> {
    let invalid = |what: &str, err: &dyn std::fmt::Display| {
        ExercisePersistenceError::query(format!("stored {what} invalid: {err}"))
    };
    let username = Username::new(row.username).map_err(|err| invalid("username", &err))?;
    let description =
        Description::new(row.description).map_err(|err| invalid("description", &err))?;
    let minutes = u32::try_from(row.duration_minutes)
        .map_err(|err| invalid("duration", &err))?;
    let duration = Minutes::new(minutes).map_err(|err| invalid("duration", &err))?;

    Ok(ExerciseEntry {
        id: ExerciseId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        username,
        description,
        duration,
        date: ExerciseDate::from_naive(row.performed_on),
    })
}

#[async_trait]
impl ExerciseRepository for DieselExerciseRepository {
    async fn insert(
        &self,
        draft: &ExerciseDraft,
    ) -> Result<ExerciseEntry, ExercisePersistenceError> {
        let new_row = NewExerciseRow {
            user_id: *draft.user_id.as_uuid(),
            username: draft.username.as_str(),
            description: draft.description.as_str(),
            duration_minutes: duration_for_db(draft.duration)?,
            performed_on: draft.date.as_naive(),
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row = diesel::insert_into(exercises::table)
            .values(&new_row)
            .returning(ExerciseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        row_to_entry(row)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &LogFilter,
    ) -> Result<Vec<ExerciseEntry>, ExercisePersistenceError> {
        let mut query = exercises::table
            .filter(exercises::user_id.eq(*user_id.as_uuid()))
            .order(exercises::seq.asc())
            .select(ExerciseRow::as_select())
            .into_boxed();
        if let Some(from) = filter.from {
            query = query.filter(exercises::performed_on.ge(from.as_naive()));
        }
        if let Some(to) = filter.to {
            query = query.filter(exercises::performed_on.le(to.as_naive()));
        }
        if let Some(limit) = filter.limit {
            query = query.limit(i64::from(limit));
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<ExerciseRow> = query.load(&mut conn).await.map_err(diesel_error)?;

        rows.into_iter().map(row_to_entry).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(duration_minutes: i32) -> ExerciseRow {
        ExerciseRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            username: "fcc_test".to_owned(),
            description: "test".to_owned(),
            duration_minutes,
            performed_on: NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"),
        }
    }

    #[rstest]
    fn row_conversion_formats_date() {
        let entry = row_to_entry(row(60)).expect("valid row");
        assert_eq!(entry.duration.get(), 60);
        assert_eq!(entry.date.to_string(), "Mon Jan 01 1990");
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn non_positive_stored_duration_is_a_query_failure(#[case] minutes: i32) {
        let err = row_to_entry(row(minutes)).expect_err("invalid row");
        assert!(matches!(err, ExercisePersistenceError::Query { .. }));
    }

    #[rstest]
    fn maximum_duration_fits_the_column() {
        let minutes = Minutes::new(crate::domain::MAX_DURATION_MINUTES).expect("max duration");
        assert_eq!(duration_for_db(minutes), Ok(i32::MAX));
    }
}
