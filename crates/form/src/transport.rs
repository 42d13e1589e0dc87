use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    multipart::{Form, Part},
};
use sitemail_shared::{FormData, FormValue};
use url::Url;

/// What came back from the endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpReply {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_owned()),
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct NetworkError(pub String);

impl From<reqwest::Error> for NetworkError {
    fn from(value: reqwest::Error) -> Self {
        Self(value.to_string())
    }
}

#[async_trait]
pub trait SubmitTransport: Send + Sync {
    /// Posts `form` as `multipart/form-data`.
    async fn post_form(&self, url: &str, form: FormData) -> Result<HttpReply, NetworkError>;
}

/// HTTP transport resolving relative endpoints against the page URL.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    page_url: Url,
}

impl ReqwestTransport {
    pub fn new(page_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), page_url)
    }

    pub fn with_client(client: reqwest::Client, page_url: Url) -> Self {
        Self { client, page_url }
    }

    fn multipart(form: FormData) -> Result<Form, NetworkError> {
        let mut multipart = Form::new();

        for (name, value) in form.parts() {
            multipart = match value {
                FormValue::Text(text) => multipart.text(name.to_owned(), text.to_owned()),
                FormValue::File(file) => {
                    let mut part = Part::bytes(file.data.clone()).file_name(file.file_name.clone());
                    if let Some(content_type) = &file.content_type {
                        part = part.mime_str(content_type)?;
                    }
                    multipart.part(name.to_owned(), part)
                }
            };
        }

        Ok(multipart)
    }
}

#[async_trait]
impl SubmitTransport for ReqwestTransport {
    #[tracing::instrument(skip(self, form))]
    async fn post_form(&self, url: &str, form: FormData) -> Result<HttpReply, NetworkError> {
        let url = self
            .page_url
            .join(url)
            .map_err(|err| NetworkError(format!("{url}: {err}")))?;

        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .multipart(Self::multipart(form)?)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        tracing::debug!(status, ?content_type, "endpoint replied");

        Ok(HttpReply {
            status,
            content_type,
            body,
        })
    }
}
