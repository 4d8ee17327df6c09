//! Exercise log handlers.
//!
//! ```text
//! POST /api/users/{_id}/exercises  description=run&duration=30&date=2024-01-31
//! GET  /api/users/{_id}/logs?from=2024-01-01&to=2024-01-31&limit=10
//! ```
//!
//! An unknown user is answered with HTTP 200 and an `error` body rather than
//! an error status; clients inspect the body to detect it.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::domain::ports::LogbookError;
use crate::domain::{ExerciseEntry, ExerciseLog, LogFilter, NewExercise, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    DATE, FROM, TO, parse_description, parse_duration, parse_optional_date,
    parse_optional_limit,
};

/// Body returned when the path identifier does not resolve to a user.
pub const UNKNOWN_USER_MESSAGE: &str = "This user doesn't exist!";

/// Form body for `POST /api/users/{_id}/exercises`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ExerciseForm {
    pub description: Option<String>,
    /// Whole minutes.
    pub duration: Option<String>,
    /// `yyyy-mm-dd`; defaults to today when absent or empty.
    pub date: Option<String>,
}

/// Query string accepted by `GET /api/users/{_id}/logs`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogQuery {
    /// Earliest date to include, `yyyy-mm-dd`.
    pub from: Option<String>,
    /// Latest date to include, `yyyy-mm-dd`.
    pub to: Option<String>,
    /// Maximum number of entries to return.
    pub limit: Option<String>,
}

/// Newly appended exercise entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub description: String,
    pub duration: u32,
    #[schema(example = "Mon Jan 01 1990")]
    pub date: String,
}

impl From<ExerciseEntry> for ExerciseResponse {
    fn from(entry: ExerciseEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            user_id: entry.user_id.to_string(),
            username: entry.username.into(),
            description: entry.description.into(),
            duration: entry.duration.get(),
            date: entry.date.to_string(),
        }
    }
}

/// Entry projection used inside a log listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LogItem {
    pub description: String,
    pub duration: u32,
    #[schema(example = "Mon Jan 01 1990")]
    pub date: String,
}

/// Filtered exercise log for one user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LogResponse {
    pub username: String,
    /// Number of entries in `log`.
    pub count: usize,
    #[serde(rename = "_id")]
    pub id: String,
    pub log: Vec<LogItem>,
}

impl From<ExerciseLog> for LogResponse {
    fn from(log: ExerciseLog) -> Self {
        let count = log.count();
        Self {
            username: log.user.username().to_string(),
            count,
            id: log.user.id().to_string(),
            log: log
                .entries
                .into_iter()
                .map(|entry| LogItem {
                    description: entry.description.into(),
                    duration: entry.duration.get(),
                    date: entry.date.to_string(),
                })
                .collect(),
        }
    }
}

/// Body returned for an unknown user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UnknownUserResponse {
    #[schema(example = "This user doesn't exist!")]
    pub error: String,
}

fn unknown_user() -> HttpResponse {
    HttpResponse::Ok().json(UnknownUserResponse {
        error: UNKNOWN_USER_MESSAGE.to_owned(),
    })
}

fn render<T, R>(outcome: Result<T, LogbookError>) -> ApiResult<HttpResponse>
where
    R: Serialize + From<T>,
{
    match outcome {
        Ok(value) => Ok(HttpResponse::Ok().json(R::from(value))),
        Err(LogbookError::UnknownUser(_)) => Ok(unknown_user()),
        Err(LogbookError::Failed(error)) => Err(error),
    }
}

/// Append an exercise entry to a user's log.
///
/// The path identifier is checked before field validation, so an identifier
/// that is not a UUID is reported as an unknown user even when the fields are
/// invalid. A body that cannot be decoded as a form is rejected by the
/// extractor first.
#[utoipa::path(
    post,
    path = "/api/users/{_id}/exercises",
    params(("_id" = String, Path, description = "User identifier")),
    request_body(
        content = ExerciseForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (
            status = 200,
            description = "Appended entry, or an error body for an unknown user",
            body = ExerciseResponse
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "addExercise"
)]
#[post("/users/{_id}/exercises")]
pub async fn add_exercise(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ExerciseForm>,
) -> ApiResult<HttpResponse> {
    let Ok(user_id) = path.parse::<UserId>() else {
        return Ok(unknown_user());
    };
    let ExerciseForm {
        description,
        duration,
        date,
    } = form.into_inner();
    let exercise = NewExercise {
        user_id,
        description: parse_description(description)?,
        duration: parse_duration(duration)?,
        date: parse_optional_date(date, DATE)?,
    };

    render::<_, ExerciseResponse>(state.logbook.append(exercise).await)
}

/// Read a user's exercise log.
///
/// `from` and `to` are inclusive bounds; `limit` keeps the earliest entries.
#[utoipa::path(
    get,
    path = "/api/users/{_id}/logs",
    params(("_id" = String, Path, description = "User identifier"), LogQuery),
    responses(
        (
            status = 200,
            description = "Filtered log, or an error body for an unknown user",
            body = LogResponse
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "getLog"
)]
#[get("/users/{_id}/logs")]
pub async fn get_log(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<LogQuery>,
) -> ApiResult<HttpResponse> {
    let Ok(user_id) = path.parse::<UserId>() else {
        return Ok(unknown_user());
    };
    let LogQuery { from, to, limit } = query.into_inner();
    let filter = LogFilter {
        from: parse_optional_date(from, FROM)?,
        to: parse_optional_date(to, TO)?,
        limit: parse_optional_limit(limit)?,
    };

    render::<_, LogResponse>(state.logbook.query(&user_id, filter).await)
}
