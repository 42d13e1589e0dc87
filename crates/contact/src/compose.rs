use askama::Template;
use sitemail_shared::FormData;
use validator::{Validate, ValidationError};

use crate::Discriminator;

/// Phone shown when the form sent none.
pub const PHONE_FALLBACK: &str = "Not provided";

/// Placeholder some forms send instead of leaving the subject empty.
pub const NO_SUBJECT: &str = "No Subject";

/// Trimmed view of a submitted form.
#[derive(Validate, Debug, Clone, PartialEq, Eq)]
pub struct SubmitFormInput {
    pub name: String,
    #[validate(email, custom(function = "validate_mailbox_address"))]
    pub email: String,
    pub message: String,
    pub form_type: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub specialization: Option<String>,
    pub role: Option<String>,
}

/// The address must also be usable as a reply-to mailbox.
fn validate_mailbox_address(email: &str) -> Result<(), ValidationError> {
    email
        .parse::<lettre::Address>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("mailbox_address"))
}

/// Folds line breaks and control characters into single spaces.
fn single_line(value: &str) -> String {
    value
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn trimmed(form: &FormData, name: &str) -> Option<String> {
    form.text(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

impl SubmitFormInput {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            name: trimmed(form, "name")
                .map(|name| single_line(&name))
                .unwrap_or_default(),
            email: trimmed(form, "email").unwrap_or_default(),
            message: trimmed(form, "message").unwrap_or_default(),
            // Present but blank stays blank; only a missing field gets the default.
            form_type: form.text("form_type").map(|value| value.trim().to_owned()),
            phone: trimmed(form, "phone"),
            subject: trimmed(form, "subject").filter(|subject| subject != NO_SUBJECT),
            specialization: trimmed(form, "specialization"),
            role: trimmed(form, "role"),
        }
    }

    pub fn discriminator(&self) -> Discriminator {
        Discriminator::parse(self.form_type.as_deref())
    }

    pub fn phone(&self) -> &str {
        self.phone.as_deref().unwrap_or(PHONE_FALLBACK)
    }
}

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactHtmlTemplate<'a> {
    heading: &'a str,
    emphasized: bool,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    role: Option<&'a str>,
    specialization: Option<&'a str>,
    subject: Option<&'a str>,
    message_lines: Vec<&'a str>,
    site_name: &'a str,
}

#[derive(Template)]
#[template(path = "contact.txt")]
struct ContactPlainTemplate<'a> {
    subject: &'a str,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
}

/// Rendered notification for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMail {
    pub subject: String,
    pub heading: String,
    pub html: String,
    pub plain: String,
}

impl ContactMail {
    pub fn compose(input: &SubmitFormInput, site_name: &str) -> crate::Result<Self> {
        let discriminator = input.discriminator();
        let subject = discriminator.subject(&input.name, &input.email);

        let html = ContactHtmlTemplate {
            heading: discriminator.heading(),
            emphasized: discriminator.emphasized(),
            name: &input.name,
            email: &input.email,
            phone: input.phone(),
            role: input.role.as_deref(),
            specialization: input.specialization.as_deref(),
            subject: input.subject.as_deref(),
            message_lines: input.message.lines().collect(),
            site_name,
        }
        .render()?;

        let plain = ContactPlainTemplate {
            subject: &subject,
            name: &input.name,
            email: &input.email,
            phone: input.phone(),
            message: &input.message,
        }
        .render()?;

        Ok(Self {
            heading: discriminator.heading().to_owned(),
            subject,
            html,
            plain,
        })
    }
}
