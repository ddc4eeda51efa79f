use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, From};

/// Failures inside a request that end in a generic 500.
#[derive(Debug, Display, From)]
pub enum AppError {
    #[display(fmt = "storage error: {}", _0)]
    Storage(sqlx::Error),
    #[display(fmt = "qr encoding error: {}", _0)]
    QrEncode(qrcode::types::QrError),
    #[display(fmt = "image encoding error: {}", _0)]
    Image(image::ImageError),
    #[display(fmt = "csv error: {}", _0)]
    Csv(csv::Error),
    #[display(fmt = "template error: {}", _0)]
    Template(askama::Error),
    #[display(fmt = "session token error: {}", _0)]
    Token(jsonwebtoken::errors::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!(error = %self, "Request failed");
        HttpResponse::InternalServerError().body("Internal Server Error")
    }
}
