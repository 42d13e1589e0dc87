use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lettre::Message;
use sitemail_contact::{Command, EmailConfig, Mailer, SendError};

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

pub fn setup_command(mailer: Arc<RecordingMailer>) -> anyhow::Result<Command> {
    let config = EmailConfig {
        from_address: "website@acme.localhost".to_owned(),
        from_name: "Acme".to_owned(),
        contact_address: "inbox@acme.localhost".to_owned(),
        ..Default::default()
    };

    Ok(Command::new(mailer, &config)?)
}
