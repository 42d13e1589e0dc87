//! Outbound mail transport using lettre

use async_trait::async_trait;
use lettre::{
    Message, SmtpTransport, Transport, transport::smtp::authentication::Credentials,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SmtpTls {
    /// Plain connection upgraded with STARTTLS (port 587).
    #[default]
    StartTls,
    /// Implicit TLS (port 465).
    Tls,
    /// No encryption, for local catchers such as MailDev.
    None,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default)]
    pub smtp_tls: SmtpTls,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Mailbox receiving every submission.
    #[serde(default = "default_contact_address")]
    pub contact_address: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            smtp_tls: SmtpTls::default(),
            from_address: default_from_address(),
            from_name: default_from_name(),
            contact_address: default_contact_address(),
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "website@sitemail.localhost".to_string()
}

fn default_from_name() -> String {
    "Sitemail".to_string()
}

fn default_contact_address() -> String {
    "contact@sitemail.localhost".to_string()
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct SendError(pub String);

impl From<lettre::transport::smtp::Error> for SendError {
    fn from(value: lettre::transport::smtp::Error) -> Self {
        Self(value.to_string())
    }
}

/// Delivers a composed message. One call, no retries.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: Message) -> Result<(), SendError>;
}

/// SMTP relay mailer
#[derive(Clone)]
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> crate::Result<Self> {
        let transport = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );

            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                tls = ?config.smtp_tls,
                from = %config.from_address,
                "SMTP relay configured with authentication"
            );

            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

            let builder = match config.smtp_tls {
                SmtpTls::StartTls => SmtpTransport::starttls_relay(&config.smtp_host),
                SmtpTls::Tls => SmtpTransport::relay(&config.smtp_host),
                SmtpTls::None => Ok(SmtpTransport::builder_dangerous(&config.smtp_host)),
            }
            .map_err(|err| crate::Error::Config(format!("smtp relay: {err}")))?;

            builder
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: Message) -> Result<(), SendError> {
        let transport = self.transport.clone();

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|err| SendError(err.to_string()))??;

        Ok(())
    }
}
