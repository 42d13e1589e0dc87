use crate::AttachmentError;

/// Failures of a contact submission. `Display` is the text shown to the
/// visitor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid email")]
    InvalidEmail,

    #[error("{0}")]
    Attachment(#[from] AttachmentError),

    #[error("Mailer Error: {0}")]
    Mailer(String),

    #[error("Mailer Error: {0}")]
    Template(#[from] askama::Error),

    #[error("{0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<validator::ValidationErrors> for Error {
    fn from(_: validator::ValidationErrors) -> Self {
        Self::InvalidEmail
    }
}

impl From<lettre::error::Error> for Error {
    fn from(value: lettre::error::Error) -> Self {
        Self::Mailer(value.to_string())
    }
}

impl From<lettre::address::AddressError> for Error {
    fn from(value: lettre::address::AddressError) -> Self {
        Self::Mailer(format!("Invalid address: {value}"))
    }
}

impl From<crate::SendError> for Error {
    fn from(value: crate::SendError) -> Self {
        Self::Mailer(value.to_string())
    }
}
