#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use lettre::Message;
use sitemail::{
    AppState, Config,
    config::{ObservabilityConfig, ServerConfig, UploadConfig},
};
use sitemail_contact::{EmailConfig, Mailer, SendError};
use sitemail_shared::{CONTACT_PATH, StatusEnvelope};

/// Records messages instead of talking to an SMTP server.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Message>>,
    failure: Option<String>,
}

impl RecordingMailer {
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|message| String::from_utf8_lossy(&message.formatted()).into_owned())
            .collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: Message) -> Result<(), SendError> {
        if let Some(reason) = &self.failure {
            return Err(SendError(reason.to_owned()));
        }

        self.sent.lock().unwrap().push(message);

        Ok(())
    }
}

pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        },
        email: EmailConfig {
            from_address: "website@acme.localhost".to_string(),
            from_name: "Acme".to_string(),
            contact_address: "inbox@acme.localhost".to_string(),
            ..Default::default()
        },
        upload: UploadConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub fn create_test_app(mailer: Arc<RecordingMailer>) -> anyhow::Result<Router> {
    let config = create_test_config();
    let contact_command = sitemail_contact::Command::new(mailer, &config.email)?;

    Ok(sitemail::router(AppState {
        config,
        contact_command,
    }))
}

const BOUNDARY: &str = "sitemail-test-boundary";

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self) -> Request<Body> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(format!("{CONTACT_PATH}?t=1700000000000"))
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.bytes))
            .unwrap()
    }
}

pub async fn read_envelope(response: axum::response::Response) -> anyhow::Result<StatusEnvelope> {
    let body = response.into_body().collect().await?.to_bytes();

    Ok(serde_json::from_slice(&body)?)
}
