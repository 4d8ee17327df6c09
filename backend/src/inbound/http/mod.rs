//! HTTP inbound adapter exposing the exercise tracker API.

pub mod error;
pub mod exercises;
pub mod health;
pub mod landing;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

use actix_web::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use actix_web::middleware::DefaultHeaders;
use actix_web::web;

pub use error::ApiResult;

/// Form extractor configuration turning decode failures into domain errors.
fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| validation::malformed_body_error(&err).into())
}

/// Query extractor configuration turning decode failures into domain errors.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| validation::malformed_body_error(&err).into())
}

/// Response headers allowing browser clients from any origin.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new().add((ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
}

/// Register the landing page and the `/api` routes.
///
/// Handlers expect [`state::HttpState`] in application data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use exercise_tracker::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        .app_data(query_config())
        .service(landing::index)
        .service(
            web::scope("/api")
                .service(users::create_user)
                .service(users::list_users)
                .service(exercises::add_exercise)
                .service(exercises::get_log),
        );
}
