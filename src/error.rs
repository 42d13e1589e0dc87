use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sitemail_contact::Error as ContactError;
use sitemail_shared::StatusEnvelope;
use thiserror::Error;

/// Failures answered by the contact endpoint. Every variant becomes a JSON
/// status envelope whose message is the `Display` text.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error("Invalid form data: {0}")]
    Form(String),
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::Form(err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Contact(ContactError::Mailer(e) | ContactError::Config(e)) => {
                tracing::error!("Mailer error: {}", e);
                StatusCode::OK
            }
            AppError::Contact(ContactError::Template(e)) => {
                tracing::error!("Template error: {:?}", e);
                StatusCode::OK
            }
            AppError::Contact(e) => {
                tracing::warn!("Rejected submission: {}", e);
                StatusCode::OK
            }
            AppError::Form(e) => {
                tracing::warn!("Unreadable form: {}", e);
                StatusCode::OK
            }
        };

        (status_code, Json(StatusEnvelope::error(self.to_string()))).into_response()
    }
}
