//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports ([`UserDirectory`], [`ExerciseLogbook`]) are what inbound
//! adapters call. Driven ports ([`UserRepository`], [`ExerciseRepository`])
//! are what the record store adapters implement. Driven ports expose strongly
//! typed errors so adapters map their failures into predictable variants.

mod exercise_logbook;
mod exercise_repository;
mod macros;
mod user_directory;
mod user_repository;

pub(crate) use macros::define_port_error;

pub use exercise_logbook::{ExerciseLogbook, LogbookError};
#[cfg(test)]
pub use exercise_repository::MockExerciseRepository;
pub use exercise_repository::{ExercisePersistenceError, ExerciseRepository};
pub use user_directory::UserDirectory;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
