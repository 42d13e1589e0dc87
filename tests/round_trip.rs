//! The real client controller against a bound server

mod common;

use std::{net::SocketAddr, sync::Arc};

use common::{RecordingMailer, create_test_app};
use sitemail_form::{
    ActionEndpoint, FixedEndpoint, FormController, FormView, HeadlessForm, PageLocation, ReqwestTransport,
    StatusMessage, SubmitError,
};
use sitemail_shared::{FilePart, FormData};
use url::Url;

async fn spawn_server(mailer: Arc<RecordingMailer>) -> anyhow::Result<SocketAddr> {
    let app = create_test_app(mailer)?;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(addr)
}

/// Loopback requests must not go through a proxy from the environment.
fn transport(page: Url) -> anyhow::Result<ReqwestTransport> {
    let client = reqwest::Client::builder().no_proxy().build()?;

    Ok(ReqwestTransport::with_client(client, page))
}

fn contact_form() -> HeadlessForm {
    HeadlessForm::new(
        FormData::new()
            .with_text("name", "")
            .with_text("email", "")
            .with_text("message", ""),
    )
    .with_id("contactForm")
    .with_action("backend/contact.php")
    .with_submit_button("Send Message")
}

#[tokio::test]
async fn test_submission_reaches_mailer() -> anyhow::Result<()> {
    let mailer = Arc::new(RecordingMailer::default());
    let addr = spawn_server(mailer.clone()).await?;

    let form = Arc::new(contact_form());
    form.fill("name", "Jane");
    form.fill("email", "jane@example.com");
    form.fill("message", "Hi");

    let page = Url::parse(&format!("http://{addr}/index.html"))?;
    let controller = FormController::new(
        form.clone(),
        transport(page)?,
        ActionEndpoint::new(PageLocation::Root),
    );

    let submission = controller.submit().await;

    assert_eq!(
        submission.outcome,
        Ok("Thank you! Your message has been sent.".to_string())
    );
    assert_eq!(form.data().text("name"), Some(""));
    assert!(mailer.sent()[0].contains("Subject: Contact Form - Jane"));

    Ok(())
}

#[tokio::test]
async fn test_nested_page_climbs_to_backend() -> anyhow::Result<()> {
    let mailer = Arc::new(RecordingMailer::default());
    let addr = spawn_server(mailer.clone()).await?;

    let form = Arc::new(contact_form().with_action("contact.php"));
    form.fill("name", "Jane");
    form.fill("email", "jane@example.com");

    let page = Url::parse(&format!("http://{addr}/pages/careers.html"))?;
    let controller = FormController::new(
        form.clone(),
        transport(page.clone())?,
        ActionEndpoint::new(PageLocation::detect(page.path())),
    );

    assert!(controller.submit().await.outcome.is_ok());
    assert_eq!(mailer.sent().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_form_without_action_posts_to_its_page() -> anyhow::Result<()> {
    let mailer = Arc::new(RecordingMailer::default());
    let addr = spawn_server(mailer.clone()).await?;

    let form = Arc::new(
        HeadlessForm::new(
            FormData::new()
                .with_text("name", "Jane")
                .with_text("email", "jane@example.com"),
        )
        .with_id("contactForm"),
    );

    let page = Url::parse(&format!("http://{addr}/backend/contact.php"))?;
    let controller = FormController::new(form, transport(page)?, ActionEndpoint::default());

    assert!(controller.submit().await.outcome.is_ok());
    assert_eq!(mailer.sent().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_server_rejection_is_rendered() -> anyhow::Result<()> {
    let mailer = Arc::new(RecordingMailer::default());
    let addr = spawn_server(mailer.clone()).await?;

    let form = Arc::new(contact_form());
    form.fill("name", "Jane");
    form.fill("email", "jane@example");

    let page = Url::parse(&format!("http://{addr}/"))?;
    let controller = FormController::new(
        form.clone(),
        transport(page)?,
        FixedEndpoint::default(),
    );

    let submission = controller.submit().await;

    assert_eq!(
        submission.outcome,
        Err(SubmitError::Rejected("Invalid email".to_string()))
    );
    assert_eq!(
        form.snapshot().status,
        Some(Some(StatusMessage::error("Invalid email")))
    );
    assert_eq!(form.data().text("name"), Some("Jane"));
    assert!(mailer.sent().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_resume_upload_round_trip() -> anyhow::Result<()> {
    let mailer = Arc::new(RecordingMailer::default());
    let addr = spawn_server(mailer.clone()).await?;

    let form = Arc::new(
        HeadlessForm::new(
            FormData::new()
                .with_text("form_type", "Internship Application")
                .with_text("name", "Sam")
                .with_text("email", "sam@example.com")
                .with_file(
                    "resume",
                    FilePart::new("cv.docx", b"PK\x03\x04".to_vec()).with_content_type(
                        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                    ),
                ),
        )
        .with_id("careerForm"),
    );

    let page = Url::parse(&format!("http://{addr}/"))?;
    let controller =
        FormController::new(form, transport(page)?, FixedEndpoint::default());

    let submission = controller.submit().await;

    assert!(submission.outcome.is_ok());
    assert!(submission.pending_close.is_some());

    let sent = mailer.sent();
    assert!(sent[0].contains("Subject: Internship Request - Sam"));
    assert!(sent[0].contains("cv.docx"));

    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_not_found() -> anyhow::Result<()> {
    let addr = spawn_server(Arc::new(RecordingMailer::default())).await?;

    let form = Arc::new(contact_form().with_action("/missing.php"));
    form.fill("email", "jane@example.com");

    let page = Url::parse(&format!("http://{addr}/"))?;
    let controller = FormController::new(
        form.clone(),
        transport(page)?,
        ActionEndpoint::default(),
    );

    let submission = controller.submit().await;

    assert_eq!(submission.outcome, Err(SubmitError::HttpStatus(404)));
    assert_eq!(
        form.snapshot().status,
        Some(Some(StatusMessage::error(
            "Error 404: contact endpoint not found. Check file path."
        )))
    );

    Ok(())
}
