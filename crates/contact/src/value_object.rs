use std::str::FromStr;

use strum::{Display, EnumString, VariantArray};

/// Discriminator used when a form does not send `form_type`.
pub const DEFAULT_FORM_TYPE: &str = "Contact Form";

/// Form types with a dedicated email heading and subject.
#[derive(EnumString, Display, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormType {
    #[strum(serialize = "Value Courses Application")]
    ValueCourses,
    #[strum(serialize = "Internship Application")]
    Internship,
    #[strum(
        to_string = "Project Idea",
        serialize = "Project Idea Form",
        serialize = "Home Page Contact Form"
    )]
    ProjectIdea,
    #[strum(serialize = "Collaboration Form")]
    Collaboration,
    #[strum(
        to_string = "Latest Updates Request",
        serialize = "Newsletter Subscription"
    )]
    LatestUpdates,
}

/// Submitter field appended to the subject line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubjectKey {
    Name,
    Email,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MailTemplate {
    pub heading: &'static str,
    /// Heading rendered in bold.
    pub emphasized: bool,
    pub subject_prefix: &'static str,
    pub subject_key: SubjectKey,
}

impl FormType {
    pub const fn template(self) -> MailTemplate {
        match self {
            FormType::ValueCourses => MailTemplate {
                heading: "Value Courses",
                emphasized: false,
                subject_prefix: "Value Courses Application",
                subject_key: SubjectKey::Name,
            },
            FormType::Internship => MailTemplate {
                heading: "Internship Request",
                emphasized: false,
                subject_prefix: "Internship Request",
                subject_key: SubjectKey::Name,
            },
            FormType::ProjectIdea => MailTemplate {
                heading: "The Project Idea Discussion from the User",
                emphasized: true,
                subject_prefix: "The Project Idea Discussion",
                subject_key: SubjectKey::Name,
            },
            FormType::Collaboration => MailTemplate {
                heading: "Collaboration Form",
                emphasized: false,
                subject_prefix: "Collaboration Form",
                subject_key: SubjectKey::Name,
            },
            // Newsletter forms often carry no name.
            FormType::LatestUpdates => MailTemplate {
                heading: "Latest Updates Request",
                emphasized: false,
                subject_prefix: "Latest Updates Request",
                subject_key: SubjectKey::Email,
            },
        }
    }
}

/// The `form_type` value of a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Discriminator {
    Known(FormType),
    Other(String),
}

impl Discriminator {
    /// `None` means the form sent no `form_type` field at all.
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).unwrap_or(DEFAULT_FORM_TYPE);

        match FormType::from_str(raw) {
            Ok(form_type) => Self::Known(form_type),
            Err(_) => Self::Other(raw.to_owned()),
        }
    }

    pub fn heading(&self) -> &str {
        match self {
            Self::Known(form_type) => form_type.template().heading,
            Self::Other(raw) => raw,
        }
    }

    pub fn emphasized(&self) -> bool {
        match self {
            Self::Known(form_type) => form_type.template().emphasized,
            Self::Other(_) => false,
        }
    }

    pub fn subject(&self, name: &str, email: &str) -> String {
        match self {
            Self::Known(form_type) => {
                let template = form_type.template();
                let key = match template.subject_key {
                    SubjectKey::Name => name,
                    SubjectKey::Email => email,
                };
                format!("{} - {key}", template.subject_prefix)
            }
            Self::Other(raw) => format!("{raw} - {name}"),
        }
    }
}
