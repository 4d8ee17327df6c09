//! Mutex-guarded append-only exercise table.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{ExercisePersistenceError, ExerciseRepository};
use crate::domain::{ExerciseDraft, ExerciseEntry, ExerciseId, LogFilter, UserId};

/// In-memory `ExerciseRepository` keeping entries in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryExerciseRepository {
    entries: Mutex<Vec<ExerciseEntry>>,
}

impl InMemoryExerciseRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> Result<MutexGuard<'_, Vec<ExerciseEntry>>, ExercisePersistenceError> {
        self.entries
            .lock()
            .map_err(|_| ExercisePersistenceError::query("exercise table lock poisoned"))
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryExerciseRepository {
    async fn insert(
        &self,
        draft: &ExerciseDraft,
    ) -> Result<ExerciseEntry, ExercisePersistenceError> {
        let entry = ExerciseEntry {
            id: ExerciseId::from_uuid(Uuid::new_v4()),
            user_id: draft.user_id,
            username: draft.username.clone(),
            description: draft.description.clone(),
            duration: draft.duration,
            date: draft.date,
        };
        self.table()?.push(entry.clone());
        Ok(entry)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &LogFilter,
    ) -> Result<Vec<ExerciseEntry>, ExercisePersistenceError> {
        let entries = self.table()?;
        Ok(filter.apply(
            entries
                .iter()
                .filter(|entry| &entry.user_id == user_id)
                .cloned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Description, Minutes, Username};
    use rstest::rstest;

    fn draft(user_id: UserId, date: &str) -> ExerciseDraft {
        ExerciseDraft {
            user_id,
            username: Username::new("fcc_test").expect("username"),
            description: Description::new("swim").expect("description"),
            duration: Minutes::new(45).expect("duration"),
            date: date.parse().expect("date"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let repo = InMemoryExerciseRepository::new();
        let owner = UserId::random();
        let first = repo.insert(&draft(owner, "2020-01-01")).await.expect("first");
        let second = repo.insert(&draft(owner, "2020-01-01")).await.expect("second");
        assert_ne!(first.id, second.id);
    }

    #[rstest]
    #[tokio::test]
    async fn list_for_user_only_returns_owned_entries() {
        let repo = InMemoryExerciseRepository::new();
        let owner = UserId::random();
        let other = UserId::random();
        repo.insert(&draft(owner, "2020-01-01")).await.expect("owned");
        repo.insert(&draft(other, "2020-01-02")).await.expect("other");

        let entries = repo
            .list_for_user(&owner, &LogFilter::default())
            .await
            .expect("list");
        assert_eq!(entries.len(), 1);
        assert!(entries.iter().all(|entry| entry.user_id == owner));
    }

    #[rstest]
    #[tokio::test]
    async fn list_for_user_applies_range_then_limit() {
        let repo = InMemoryExerciseRepository::new();
        let owner = UserId::random();
        for date in ["2020-01-01", "2020-02-01", "2020-02-10", "2020-03-01"] {
            repo.insert(&draft(owner, date)).await.expect("insert");
        }
        let filter = LogFilter {
            from: Some("2020-01-15".parse().expect("from")),
            to: None,
            limit: Some(2),
        };

        let entries = repo.list_for_user(&owner, &filter).await.expect("list");
        let dates: Vec<String> = entries.iter().map(|e| e.date.to_string()).collect();
        assert_eq!(dates, vec!["Sat Feb 01 2020", "Mon Feb 10 2020"]);
    }
}
