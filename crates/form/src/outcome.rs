use sitemail_shared::{Status, StatusEnvelope};

use crate::HttpReply;

/// Why a submission did not succeed. `Display` is the status text shown
/// under the form.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{}", http_status_message(.0))]
    HttpStatus(u16),

    #[error("{}", protocol_message(.returned_html))]
    ProtocolMismatch { returned_html: bool },

    #[error("Error: Server sent invalid JSON.")]
    InvalidJson,

    #[error("{0}")]
    Rejected(String),

    #[error("Network Error. Please try again.")]
    Network(String),
}

fn http_status_message(status: &u16) -> String {
    match status {
        405 => "Error 405: Method Not Allowed. Static servers cannot send emails.".to_owned(),
        404 => "Error 404: contact endpoint not found. Check file path.".to_owned(),
        status => format!("Server Error ({status}). Please try again later."),
    }
}

fn protocol_message(returned_html: &bool) -> &'static str {
    if *returned_html {
        "Error: Server returned HTML instead of JSON."
    } else {
        "Error: Server returned unexpected format."
    }
}

/// Maps a reply to the success message or the error to display.
pub fn interpret(reply: &HttpReply) -> Result<String, SubmitError> {
    if !reply.is_ok() {
        return Err(SubmitError::HttpStatus(reply.status));
    }

    let is_json = reply
        .content_type
        .as_deref()
        .is_some_and(|content_type| content_type.contains("application/json"));

    if !is_json {
        let head = reply.body.trim_start();
        tracing::error!(
            body = %head.chars().take(500).collect::<String>(),
            "expected JSON from contact endpoint"
        );

        let lowered = head.chars().take(9).collect::<String>().to_ascii_lowercase();
        return Err(SubmitError::ProtocolMismatch {
            returned_html: lowered.starts_with("<!doctype") || lowered.starts_with("<html"),
        });
    }

    let envelope = serde_json::from_str::<StatusEnvelope>(&reply.body).map_err(|err| {
        tracing::error!(%err, "invalid JSON despite JSON content type");
        SubmitError::InvalidJson
    })?;

    match envelope.status {
        Status::Success => Ok(envelope.message),
        Status::Error => Err(SubmitError::Rejected(envelope.message)),
    }
}
