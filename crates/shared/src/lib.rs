mod envelope;
mod form;

pub use envelope::*;
pub use form::*;

/// Path the contact endpoint is served under.
pub const CONTACT_PATH: &str = "/backend/contact.php";
