//! Mutex-guarded user table.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

/// In-memory `UserRepository` keeping users in registration order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> Result<MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user table lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, username: &Username) -> Result<User, UserPersistenceError> {
        let mut users = self.table()?;
        // Check and insert under one lock so the uniqueness rule holds.
        if users.iter().any(|user| user.username() == username) {
            return Err(UserPersistenceError::duplicate_username(username.as_str()));
        }
        let user = User::new(UserId::from_uuid(Uuid::new_v4()), username.clone());
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.table()?.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .table()?
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.table()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn username(raw: &str) -> Username {
        Username::new(raw).expect("valid username")
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_duplicate_username() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&username("ada")).await.expect("first insert");

        let err = repo
            .insert(&username("ada"))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(err, UserPersistenceError::duplicate_username("ada"));
        assert_eq!(repo.list_all().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn usernames_are_case_sensitive() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&username("ada")).await.expect("lower");
        repo.insert(&username("Ada")).await.expect("capitalised");
        assert_eq!(repo.list_all().await.expect("list").len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn lookups_find_inserted_user() {
        let repo = InMemoryUserRepository::new();
        let user = repo.insert(&username("grace")).await.expect("insert");

        let by_id = repo.find_by_id(user.id()).await.expect("by id");
        let by_name = repo
            .find_by_username(&username("grace"))
            .await
            .expect("by name");
        assert_eq!(by_id.as_ref(), Some(&user));
        assert_eq!(by_name.as_ref(), Some(&user));
        assert!(repo
            .find_by_id(&UserId::random())
            .await
            .expect("missing id")
            .is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn list_all_preserves_registration_order() {
        let repo = InMemoryUserRepository::new();
        for name in ["c", "a", "b"] {
            repo.insert(&username(name)).await.expect("insert");
        }
        let names: Vec<String> = repo
            .list_all()
            .await
            .expect("list")
            .iter()
            .map(|user| user.username().to_string())
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
