use std::sync::{Mutex, MutexGuard, PoisonError};

use sitemail_shared::FormData;

/// Label shown on the submit button while a request is in flight.
pub const SENDING_LABEL: &str = "Sending...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

/// Text rendered in the status region under a form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub tone: Tone,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.tone {
            Tone::Success => write!(f, "✔ {}", self.text),
            Tone::Error => write!(f, "✖ {}", self.text),
        }
    }
}

/// The parts of a form element the controller reads and updates.
pub trait FormView: Send + Sync {
    fn id(&self) -> Option<String>;

    /// Raw `action` attribute.
    fn action(&self) -> Option<String>;

    fn data(&self) -> FormData;

    /// Restores every field to its initial value.
    fn reset(&self);

    /// Sets an existing field; returns `false` when the form has no such field.
    fn set_field(&self, name: &str, value: &str) -> bool;

    /// `None` when the form has no submit button.
    fn button_label(&self) -> Option<String>;

    fn set_button(&self, label: &str, disabled: bool);

    /// Creates the status region under the form if it does not exist yet.
    fn ensure_status_region(&self);

    fn set_status(&self, status: Option<StatusMessage>);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
}

/// Snapshot of a [`HeadlessForm`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub data: FormData,
    pub button: Option<SubmitButton>,
    /// Outer `None` until the status region exists.
    pub status: Option<Option<StatusMessage>>,
}

/// In-memory form used outside a browser.
#[derive(Debug, Default)]
pub struct HeadlessForm {
    id: Option<String>,
    action: Option<String>,
    initial: FormData,
    state: Mutex<FormState>,
}

impl HeadlessForm {
    pub fn new(initial: FormData) -> Self {
        Self {
            state: Mutex::new(FormState {
                data: initial.clone(),
                ..Default::default()
            }),
            initial,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_submit_button(self, label: impl Into<String>) -> Self {
        self.lock().button = Some(SubmitButton {
            label: label.into(),
            disabled: false,
        });
        self
    }

    /// Simulates typing into a field.
    pub fn fill(&self, name: &str, value: impl Into<String>) {
        self.lock().data.set_text(name, value);
    }

    pub fn snapshot(&self) -> FormState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FormView for HeadlessForm {
    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn action(&self) -> Option<String> {
        self.action.clone()
    }

    fn data(&self) -> FormData {
        self.lock().data.clone()
    }

    fn reset(&self) {
        self.lock().data = self.initial.clone();
    }

    fn set_field(&self, name: &str, value: &str) -> bool {
        let mut state = self.lock();
        if state.data.text(name).is_none() {
            return false;
        }

        state.data.set_text(name, value);
        true
    }

    fn button_label(&self) -> Option<String> {
        self.lock().button.as_ref().map(|button| button.label.clone())
    }

    fn set_button(&self, label: &str, disabled: bool) {
        if let Some(button) = self.lock().button.as_mut() {
            button.label = label.to_owned();
            button.disabled = disabled;
        }
    }

    fn ensure_status_region(&self) {
        self.lock().status.get_or_insert(None);
    }

    fn set_status(&self, status: Option<StatusMessage>) {
        self.lock().status = Some(status);
    }
}
