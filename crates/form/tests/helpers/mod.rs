use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sitemail_form::{FormState, HeadlessForm, HttpReply, NetworkError, SubmitTransport};
use sitemail_shared::FormData;

/// One request seen by [`ScriptedTransport`].
#[derive(Clone, Debug)]
pub struct Request {
    pub url: String,
    pub form: FormData,
    /// The form as it looked while the request was in flight.
    pub view: Option<FormState>,
}

/// Answers every request with the same scripted reply.
pub struct ScriptedTransport {
    reply: Result<HttpReply, String>,
    observed: Option<Arc<HeadlessForm>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl ScriptedTransport {
    pub fn replying(reply: HttpReply) -> Self {
        Self {
            reply: Ok(reply),
            observed: None,
            requests: Default::default(),
        }
    }

    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            reply: Err(reason.into()),
            observed: None,
            requests: Default::default(),
        }
    }

    pub fn observing(mut self, form: Arc<HeadlessForm>) -> Self {
        self.observed = Some(form);
        self
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<Request>>> {
        self.requests.clone()
    }
}

#[async_trait]
impl SubmitTransport for ScriptedTransport {
    async fn post_form(&self, url: &str, form: FormData) -> Result<HttpReply, NetworkError> {
        self.requests.lock().unwrap().push(Request {
            url: url.to_owned(),
            form,
            view: self.observed.as_ref().map(|form| form.snapshot()),
        });

        self.reply.clone().map_err(NetworkError)
    }
}

pub fn success_reply() -> HttpReply {
    HttpReply::json(
        200,
        r#"{"status":"success","message":"Thank you! Your message has been sent."}"#,
    )
}

pub fn contact_form() -> HeadlessForm {
    HeadlessForm::new(
        FormData::new()
            .with_text("name", "")
            .with_text("email", "")
            .with_text("message", "")
            .with_text("form_type", "Project Idea"),
    )
    .with_id("contactForm")
    .with_action("backend/contact.php")
    .with_submit_button("Send Message")
}

pub fn career_form() -> HeadlessForm {
    HeadlessForm::new(
        FormData::new()
            .with_text("name", "")
            .with_text("email", "")
            .with_text("role", "")
            .with_text("form_type", "Internship Application"),
    )
    .with_id("careerForm")
    .with_action("backend/contact.php")
    .with_submit_button("Submit Application")
}

pub fn fill_contact(form: &HeadlessForm) {
    form.fill("name", "Jane Doe");
    form.fill("email", "jane@example.com");
    form.fill("message", "Hello there");
}
