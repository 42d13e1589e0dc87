use axum::{
    Json,
    extract::{Form, FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
};
use sitemail_shared::{FilePart, FormData, StatusEnvelope};

use crate::{error::AppError, routes::AppState};

/// POST /backend/contact.php
pub async fn action(
    State(app_state): State<AppState>,
    request: Request,
) -> Result<Json<StatusEnvelope>, AppError> {
    let form = read_form(request).await?;
    let message = app_state.contact_command.submit_form(&form).await?;

    Ok(Json(StatusEnvelope::success(message)))
}

/// Any other method on the contact path.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Reads a multipart or urlencoded body. Bodies of any other type are
/// treated as an empty form.
async fn read_form(request: Request) -> Result<FormData, AppError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::Form(e.body_text()))?;

        return read_multipart(multipart).await;
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(fields) = Form::<Vec<(String, String)>>::from_request(request, &())
            .await
            .map_err(|e| AppError::Form(e.body_text()))?;

        let mut form = FormData::new();
        for (name, value) in fields {
            form.push_text(name, value);
        }

        return Ok(form);
    }

    tracing::debug!(%content_type, "no form body");

    Ok(FormData::new())
}

async fn read_multipart(mut multipart: Multipart) -> Result<FormData, AppError> {
    let mut form = FormData::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        let Some(file_name) = field.file_name().map(str::to_owned) else {
            form.push_text(name, field.text().await?);
            continue;
        };

        let content_type = field.content_type().map(str::to_owned);
        let mut part = match field.bytes().await {
            Ok(data) => FilePart::new(file_name, data.to_vec()),
            Err(e) => FilePart::failed(file_name, e.body_text()),
        };
        if let Some(content_type) = content_type {
            part = part.with_content_type(content_type);
        }

        form.push_file(name, part);
    }

    Ok(form)
}
