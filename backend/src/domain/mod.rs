//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define the strongly typed entities of the exercise tracker and
//! the services implementing its use-cases. Types are immutable once
//! validated; constructors document their invariants.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, UserId, Username: registered identities.
//! - ExerciseEntry, ExerciseLog, LogFilter: the append-only exercise log.
//! - UserDirectoryService, ExerciseLogService: driving port implementations.

pub mod error;
pub mod exercise;
pub mod exercise_log_service;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_directory_service;

pub use self::error::{Error, ErrorCode};
pub use self::exercise::{
    Description, ExerciseDate, ExerciseDraft, ExerciseEntry, ExerciseId, ExerciseLog,
    ExerciseValidationError, LogFilter, MAX_DURATION_MINUTES, Minutes, NewExercise,
};
pub use self::exercise_log_service::ExerciseLogService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};
pub use self::user_directory_service::UserDirectoryService;
