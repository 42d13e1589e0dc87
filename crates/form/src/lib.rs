//! Headless form submission controller.
//!
//! One [`FormController`] drives one form: it posts the form's fields to the
//! contact endpoint, interprets the status envelope and updates the form's
//! view. Endpoint resolution and the HTTP transport are injected.

mod controller;
mod endpoint;
mod modal;
mod outcome;
mod transport;
mod view;

pub use controller::*;
pub use endpoint::*;
pub use modal::*;
pub use outcome::*;
pub use transport::*;
pub use view::*;
