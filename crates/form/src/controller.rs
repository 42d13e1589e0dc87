use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio::task::JoinHandle;

use crate::{
    EndpointResolver, FormView, Modal, SENDING_LABEL, StatusMessage, SubmitError,
    SubmitTransport, endpoint, interpret,
};

/// Id of the career application form.
pub const CAREER_FORM_ID: &str = "careerForm";

/// Delay before a successful career application closes its dialog.
pub const CAREER_CLOSE_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

/// Result of one [`FormController::submit`] call.
#[derive(Debug)]
pub struct Submission {
    pub outcome: Result<String, SubmitError>,
    /// Deferred dialog close, scheduled after a successful career
    /// application.
    pub pending_close: Option<JoinHandle<()>>,
}

/// Drives the submission of a single form.
pub struct FormController<V, T> {
    view: Arc<V>,
    transport: T,
    endpoint: Box<dyn EndpointResolver>,
    career_modal: Option<Arc<Modal>>,
    state: Mutex<SubmissionState>,
}

impl<V, T> FormController<V, T>
where
    V: FormView + 'static,
    T: SubmitTransport,
{
    pub fn new(view: Arc<V>, transport: T, endpoint: impl EndpointResolver + 'static) -> Self {
        Self {
            view,
            transport,
            endpoint: Box::new(endpoint),
            career_modal: None,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    /// Dialog closed after a successful career application.
    pub fn with_career_modal(mut self, modal: Arc<Modal>) -> Self {
        self.career_modal = Some(modal);
        self
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolved endpoint with a fresh cache buster.
    pub fn endpoint_url(&self) -> String {
        let action = self.view.action();
        let url = self.endpoint.resolve(action.as_deref());
        endpoint::with_cache_buster(&url, endpoint::now_millis())
    }

    /// Submit handler: posts the form and renders the outcome.
    ///
    /// The submit button is restored before returning, even when a delayed
    /// dialog close is still pending.
    #[tracing::instrument(skip_all, fields(form = ?self.view.id()))]
    pub async fn submit(&self) -> Submission {
        self.view.ensure_status_region();

        let original_label = self.view.button_label();
        if original_label.is_some() {
            self.view.set_button(SENDING_LABEL, true);
        }
        self.set_state(SubmissionState::Sending);

        let url = self.endpoint_url();
        let outcome = match self.transport.post_form(&url, self.view.data()).await {
            Ok(reply) => interpret(&reply),
            Err(err) => {
                tracing::error!(%err, %url, "form submission failed");
                Err(SubmitError::Network(err.to_string()))
            }
        };

        let mut pending_close = None;
        match &outcome {
            Ok(message) => {
                self.view.set_status(Some(StatusMessage::success(message)));
                self.view.reset();

                if self.view.id().as_deref() == Some(CAREER_FORM_ID) {
                    pending_close = Some(self.schedule_close());
                }

                self.set_state(SubmissionState::Succeeded);
            }
            Err(err) => {
                self.view.set_status(Some(StatusMessage::error(err.to_string())));
                self.set_state(SubmissionState::Failed);
            }
        }

        if let Some(label) = original_label {
            self.view.set_button(&label, false);
        }
        self.set_state(SubmissionState::Idle);

        Submission {
            outcome,
            pending_close,
        }
    }

    fn schedule_close(&self) -> JoinHandle<()> {
        let view = self.view.clone();
        let modal = self.career_modal.clone();

        tokio::spawn(async move {
            tokio::time::sleep(CAREER_CLOSE_DELAY).await;

            if let Some(modal) = modal {
                modal.close();
            }
            view.set_status(None);
        })
    }

    fn set_state(&self, next: SubmissionState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = *state;
        tracing::trace!(from = ?previous, to = ?next, "submission state");
        *state = next;
    }
}
