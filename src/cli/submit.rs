use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::Args;
use sitemail_form::{
    ActionEndpoint, EndpointResolver, FixedEndpoint, FormController, HeadlessForm, PageLocation,
    ReqwestTransport,
};
use sitemail_shared::{FilePart, FormData};
use url::Url;

/// Fields of a one-off form submission.
#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Page the form lives on; relative actions resolve against it
    #[arg(long, default_value = "http://127.0.0.1:8080/")]
    pub page: Url,

    /// Form `action` attribute; without one the form posts back to `--page`
    #[arg(long)]
    pub action: Option<String>,

    /// Ignore the action and post to the contact endpoint directly
    #[arg(long)]
    pub fixed: bool,

    /// Form id, e.g. careerForm
    #[arg(long)]
    pub id: Option<String>,

    #[arg(long)]
    pub form_type: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub specialization: Option<String>,

    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub message: Option<String>,

    /// Résumé file to attach
    #[arg(long)]
    pub resume: Option<PathBuf>,
}

impl SubmitArgs {
    async fn form_data(&self) -> Result<FormData> {
        let mut form = FormData::new();

        let text_fields = [
            ("form_type", &self.form_type),
            ("name", &self.name),
            ("phone", &self.phone),
            ("subject", &self.subject),
            ("specialization", &self.specialization),
            ("role", &self.role),
            ("message", &self.message),
        ];
        for (name, value) in text_fields {
            if let Some(value) = value {
                form.push_text(name, value.to_owned());
            }
        }
        form.push_text("email", self.email.to_owned());

        if let Some(path) = &self.resume {
            let data = tokio::fs::read(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            form.push_file("resume", FilePart::new(file_name, data));
        }

        Ok(form)
    }

    fn endpoint(&self) -> Box<dyn EndpointResolver> {
        if self.fixed {
            Box::new(FixedEndpoint::default())
        } else {
            Box::new(ActionEndpoint::new(PageLocation::detect(self.page.path())))
        }
    }
}

/// Posts one form through the client controller and prints the status line.
pub async fn submit(args: SubmitArgs) -> Result<()> {
    let mut form = HeadlessForm::new(args.form_data().await?).with_submit_button("Send");
    if let Some(id) = &args.id {
        form = form.with_id(id);
    }
    if let Some(action) = &args.action {
        form = form.with_action(action);
    }
    let form = Arc::new(form);

    let transport = ReqwestTransport::new(args.page.clone());
    let controller = FormController::new(form.clone(), transport, args.endpoint());

    let submission = controller.submit().await;

    if let Some(Some(status)) = form.snapshot().status {
        println!("{status}");
    }

    match submission.outcome {
        Ok(_) => Ok(()),
        Err(err) => bail!("submission failed: {err}"),
    }
}
