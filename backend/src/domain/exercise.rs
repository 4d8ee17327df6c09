//! Exercise log entries and the filters used to read them back.
//!
//! Entries are append-only. Each one carries a denormalised copy of the
//! owning user's username taken at creation time.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{User, UserId, Username};

/// Validation errors returned when constructing exercise components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExerciseValidationError {
    /// The description is empty once trimmed of whitespace.
    #[error("description must not be empty")]
    EmptyDescription,
    /// The duration is zero.
    #[error("duration must be at least one minute")]
    ZeroDuration,
    /// The duration cannot be represented by the record store.
    #[error("duration must be at most {max} minutes")]
    DurationTooLong { max: u32 },
    /// The date is not a `yyyy-mm-dd` calendar date.
    #[error("date must be a calendar date in yyyy-mm-dd format")]
    InvalidDate,
}

/// Identifier of a stored exercise entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(Uuid);

impl ExerciseId {
    /// Wrap an identifier assigned by the record store.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Free-text description of the exercise performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Validate and construct a [`Description`].
    pub fn new(description: impl Into<String>) -> Result<Self, ExerciseValidationError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ExerciseValidationError::EmptyDescription);
        }
        Ok(Self(description))
    }

    /// Borrow the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl TryFrom<String> for Description {
    type Error = ExerciseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Largest duration accepted, bounded by the store's 32-bit signed column.
pub const MAX_DURATION_MINUTES: u32 = i32::MAX as u32;

/// Exercise duration in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Minutes(u32);

impl Minutes {
    /// Validate and construct a duration.
    pub fn new(minutes: u32) -> Result<Self, ExerciseValidationError> {
        if minutes == 0 {
            return Err(ExerciseValidationError::ZeroDuration);
        }
        if minutes > MAX_DURATION_MINUTES {
            return Err(ExerciseValidationError::DurationTooLong {
                max: MAX_DURATION_MINUTES,
            });
        }
        Ok(Self(minutes))
    }

    /// Number of minutes.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<Minutes> for u32 {
    fn from(value: Minutes) -> Self {
        value.0
    }
}

impl TryFrom<u32> for Minutes {
    type Error = ExerciseValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Calendar date an exercise was performed on.
///
/// Parsed from `yyyy-mm-dd` and displayed in the human-readable form clients
/// expect, e.g. `Mon Jan 01 1990`.
///
/// # Examples
/// ```
/// use exercise_tracker::domain::ExerciseDate;
///
/// let date: ExerciseDate = "1990-01-01".parse().unwrap();
/// assert_eq!(date.to_string(), "Mon Jan 01 1990");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseDate(NaiveDate);

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%a %b %d %Y";

impl ExerciseDate {
    /// Wrap an already valid calendar date.
    #[must_use]
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Access the underlying date.
    #[must_use]
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for ExerciseDate {
    type Err = ExerciseValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts unpadded fields; insist on the fixed-width form.
        let fixed_width = s.len() == 10
            && s.char_indices().all(|(index, ch)| match index {
                4 | 7 => ch == '-',
                _ => ch.is_ascii_digit(),
            });
        if !fixed_width {
            return Err(ExerciseValidationError::InvalidDate);
        }
        NaiveDate::parse_from_str(s, ISO_DATE_FORMAT)
            .map(Self)
            .map_err(|_| ExerciseValidationError::InvalidDate)
    }
}

impl fmt::Display for ExerciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_DATE_FORMAT))
    }
}

impl Serialize for ExerciseDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Request to append an exercise to a user's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    pub user_id: UserId,
    pub description: Description,
    pub duration: Minutes,
    /// Defaults to the current calendar date when absent.
    pub date: Option<ExerciseDate>,
}

/// Fully resolved entry handed to the record store for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDraft {
    pub user_id: UserId,
    pub username: Username,
    pub description: Description,
    pub duration: Minutes,
    pub date: ExerciseDate,
}

impl ExerciseDraft {
    /// Combine a resolved owner with the submitted exercise details.
    #[must_use]
    pub fn for_user(owner: &User, exercise: NewExercise, date: ExerciseDate) -> Self {
        Self {
            user_id: *owner.id(),
            username: owner.username().clone(),
            description: exercise.description,
            duration: exercise.duration,
            date,
        }
    }
}

/// Stored exercise entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseEntry {
    pub id: ExerciseId,
    pub user_id: UserId,
    pub username: Username,
    pub description: Description,
    pub duration: Minutes,
    pub date: ExerciseDate,
}

/// Date-range and count restrictions applied when reading a log.
///
/// Bounds are inclusive. The limit applies after the range, keeping the
/// earliest-inserted entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub from: Option<ExerciseDate>,
    pub to: Option<ExerciseDate>,
    pub limit: Option<u32>,
}

impl LogFilter {
    /// Whether `date` falls inside the requested range.
    #[must_use]
    pub fn admits(&self, date: ExerciseDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Apply the range and limit to entries given in insertion order.
    pub fn apply<I>(&self, entries: I) -> Vec<ExerciseEntry>
    where
        I: IntoIterator<Item = ExerciseEntry>,
    {
        let limit = self.limit.map_or(usize::MAX, |limit| limit as usize);
        entries
            .into_iter()
            .filter(|entry| self.admits(entry.date))
            .take(limit)
            .collect()
    }
}

/// A user's exercise log after filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseLog {
    pub user: User,
    pub entries: Vec<ExerciseEntry>,
}

impl ExerciseLog {
    /// Number of entries actually returned.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
