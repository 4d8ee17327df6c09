//! User registration and listing handlers.
//!
//! ```text
//! POST /api/users      username=fcc_test
//! GET  /api/users
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_username;

/// Form body for `POST /api/users`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserForm {
    pub username: Option<String>,
}

/// Public projection of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = "fcc_test")]
    pub username: String,
    #[serde(rename = "_id")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
        }
    }
}

/// Register a username, or return the existing registration.
///
/// Repeating the request with the same username yields the same `_id`.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body(
        content = CreateUserForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Registered user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    form: web::Form<CreateUserForm>,
) -> ApiResult<web::Json<UserResponse>> {
    let username = parse_username(form.into_inner().username)?;
    let user = state.users.register_or_fetch(username).await?;
    Ok(web::Json(user.into()))
}

/// List every registered user.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_all().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

#[cfg(test)]
mod tests;
