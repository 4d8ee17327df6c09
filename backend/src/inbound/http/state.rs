//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ExerciseLogbook, UserDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserDirectory>,
    pub logbook: Arc<dyn ExerciseLogbook>,
}

impl HttpState {
    /// Construct state from the two driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use exercise_tracker::domain::{ExerciseLogService, UserDirectoryService};
    /// use exercise_tracker::inbound::http::state::HttpState;
    /// use exercise_tracker::outbound::memory::{
    ///     InMemoryExerciseRepository, InMemoryUserRepository,
    /// };
    /// use mockable::DefaultClock;
    ///
    /// let users = Arc::new(InMemoryUserRepository::new());
    /// let exercises = Arc::new(InMemoryExerciseRepository::new());
    /// let state = HttpState::new(
    ///     Arc::new(UserDirectoryService::new(users.clone())),
    ///     Arc::new(ExerciseLogService::new(users, exercises, Arc::new(DefaultClock))),
    /// );
    /// let _logbook = state.logbook.clone();
    /// ```
    pub fn new(users: Arc<dyn UserDirectory>, logbook: Arc<dyn ExerciseLogbook>) -> Self {
        Self { users, logbook }
    }
}
