use lettre::message::{Attachment, SinglePart, header::ContentType};
use sitemail_shared::FilePart;

/// Form field carrying an optional résumé upload.
pub const RESUME_FIELD: &str = "resume";

/// Uploads must be strictly smaller than 5 MiB.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("Invalid file type. Only PDF, DOC, DOCX allowed.")]
    InvalidType { extension: String },

    #[error("File is too large. Max 5MB.")]
    TooLarge { size: usize },
}

/// Lowercased text after the last dot; the whole name when there is none.
pub fn extension(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or(file_name)
        .to_lowercase()
}

/// Extension is checked before size.
pub fn check_resume(file: &FilePart) -> Result<(), AttachmentError> {
    let extension = extension(&file.file_name);
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AttachmentError::InvalidType { extension });
    }

    if file.size() >= MAX_RESUME_BYTES {
        return Err(AttachmentError::TooLarge { size: file.size() });
    }

    Ok(())
}

/// Picks the upload to attach, if any.
///
/// Unselected inputs and parts that failed in transit are skipped without
/// complaint; anything else must pass [`check_resume`].
pub fn accepted_resume(file: Option<&FilePart>) -> Result<Option<&FilePart>, AttachmentError> {
    let Some(file) = file.filter(|file| file.is_selected()) else {
        return Ok(None);
    };

    if let Some(error) = &file.error {
        tracing::warn!(file_name = %file.file_name, %error, "skipping failed upload");
        return Ok(None);
    }

    check_resume(file)?;

    Ok(Some(file))
}

pub(crate) fn attachment_part(file: &FilePart) -> crate::Result<SinglePart> {
    let content_type = match &file.content_type {
        Some(content_type) => content_type.to_owned(),
        None => mime_guess::from_path(&file.file_name)
            .first_or_octet_stream()
            .to_string(),
    };
    let content_type = ContentType::parse(&content_type)
        .map_err(|err| crate::Error::Mailer(format!("{content_type}: {err}")))?;

    Ok(Attachment::new(file.file_name.to_owned()).body(file.data.clone(), content_type))
}
