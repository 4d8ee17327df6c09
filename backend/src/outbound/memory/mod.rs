//! In-memory record store adapters.
//!
//! These honour the same contracts as the PostgreSQL adapters, including
//! username uniqueness and insertion-ordered logs. They back the HTTP tests
//! and serve as the store when no database URL is configured. Contents are
//! lost when the process exits.

mod exercise_repository;
mod user_repository;

pub use exercise_repository::InMemoryExerciseRepository;
pub use user_repository::InMemoryUserRepository;
