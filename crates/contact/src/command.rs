use std::sync::Arc;

use lettre::{
    Message,
    message::{Mailbox, MultiPart},
};
use sitemail_shared::FormData;
use validator::Validate;

use crate::{ContactMail, EmailConfig, Error, Mailer, RESUME_FIELD, SubmitFormInput};

/// Envelope message returned once the notification left.
pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent.";

/// Reply-to display name for anonymous submissions.
pub const ANONYMOUS_NAME: &str = "Website User";

/// Turns contact form submissions into notification emails.
#[derive(Clone)]
pub struct Command {
    mailer: Arc<dyn Mailer>,
    from: Mailbox,
    to: Mailbox,
    site_name: String,
}

impl Command {
    pub fn new(mailer: Arc<dyn Mailer>, config: &EmailConfig) -> crate::Result<Self> {
        let from = Mailbox::new(
            Some(config.from_name.to_owned()),
            config
                .from_address
                .parse()
                .map_err(|err| Error::Config(format!("from_address: {err}")))?,
        );
        let to = config
            .contact_address
            .parse::<Mailbox>()
            .map_err(|err| Error::Config(format!("contact_address: {err}")))?;

        Ok(Self {
            mailer,
            from,
            to,
            site_name: config.from_name.to_owned(),
        })
    }

    /// Validates, composes and sends one submission.
    ///
    /// Nothing is sent unless the email address and the optional résumé are
    /// both acceptable.
    #[tracing::instrument(skip_all, fields(form_type, email))]
    pub async fn submit_form(&self, form: &FormData) -> crate::Result<&'static str> {
        let input = SubmitFormInput::from_form(form);
        tracing::Span::current()
            .record("form_type", input.form_type.as_deref().unwrap_or_default())
            .record("email", &input.email);

        if input.email.is_empty() {
            return Err(Error::InvalidEmail);
        }
        input.validate()?;

        let mail = ContactMail::compose(&input, &self.site_name)?;
        let resume = crate::accepted_resume(form.file(RESUME_FIELD))?;
        let message = self.build_message(&input, mail, resume)?;

        self.mailer.send(message).await?;
        tracing::info!("contact notification sent");

        Ok(SUCCESS_MESSAGE)
    }

    fn build_message(
        &self,
        input: &SubmitFormInput,
        mail: ContactMail,
        resume: Option<&sitemail_shared::FilePart>,
    ) -> crate::Result<Message> {
        let reply_name = if input.name.is_empty() {
            ANONYMOUS_NAME
        } else {
            input.name.as_str()
        };
        let reply_to = Mailbox::new(Some(reply_name.to_owned()), input.email.parse()?);

        let body = MultiPart::alternative_plain_html(mail.plain, mail.html);
        let body = match resume {
            Some(file) => MultiPart::mixed()
                .multipart(body)
                .singlepart(crate::attachment_part(file)?),
            None => body,
        };

        Ok(Message::builder()
            .from(self.from.clone())
            .reply_to(reply_to)
            .to(self.to.clone())
            .subject(mail.subject)
            .multipart(body)?)
    }
}
