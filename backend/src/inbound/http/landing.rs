//! Static landing page with forms for the API operations.

use actix_web::{HttpResponse, get, http::header::ContentType};

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Serve the landing page.
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}
