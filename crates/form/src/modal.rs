use std::sync::{Arc, Mutex, PoisonError};

use crate::FormView;

/// Field prefilled when the career dialog opens.
pub const ROLE_FIELD: &str = "role";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// Where a window click landed, relative to a dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed overlay around the dialog surface.
    Overlay,
    /// Anything inside the dialog surface.
    Surface,
    /// Somewhere outside the dialog element.
    Elsewhere,
}

/// A dialog that is either open or closed.
#[derive(Debug)]
pub struct Modal {
    name: String,
    state: Mutex<ModalState>,
}

impl Modal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(ModalState::Closed),
        }
    }

    pub fn state(&self) -> ModalState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_open(&self) -> bool {
        self.state() == ModalState::Open
    }

    pub fn open(&self) {
        self.transition(ModalState::Open);
    }

    pub fn close(&self) {
        self.transition(ModalState::Closed);
    }

    /// Only a click on the overlay itself dismisses the dialog.
    pub fn on_window_click(&self, target: ClickTarget) {
        if target == ClickTarget::Overlay {
            self.close();
        }
    }

    fn transition(&self, next: ModalState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = *state;
        if previous != next {
            tracing::debug!(modal = %self.name, from = ?previous, to = ?next, "modal transition");
            *state = next;
        }
    }
}

/// Control that opens the career dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trigger {
    /// Title of the listed position the control belongs to.
    pub position_title: Option<String>,
}

impl Trigger {
    /// A general call to action, not tied to a position.
    pub fn general() -> Self {
        Self::default()
    }

    pub fn position(title: impl Into<String>) -> Self {
        Self {
            position_title: Some(title.into()),
        }
    }
}

/// Career application dialog wrapping the application form.
pub struct CareerDialog<V> {
    modal: Arc<Modal>,
    form: Arc<V>,
}

impl<V: FormView> CareerDialog<V> {
    pub fn new(modal: Arc<Modal>, form: Arc<V>) -> Self {
        Self { modal, form }
    }

    pub fn modal(&self) -> &Arc<Modal> {
        &self.modal
    }

    /// Opens the dialog and prefills the role with the trigger's position,
    /// clearing it for general triggers.
    pub fn open(&self, trigger: &Trigger) {
        self.modal.open();

        let role = trigger.position_title.as_deref().unwrap_or_default();
        self.form.set_field(ROLE_FIELD, role);
    }

    pub fn close(&self) {
        self.modal.close();
    }

    pub fn on_window_click(&self, target: ClickTarget) {
        self.modal.on_window_click(target);
    }
}
