//! The lifecycle of a form submission.
//!
//! Each workflow moves `Idle -> Submitting -> Succeeded | Failed`. Both end
//! states only decide which notice is shown, a new submission from either of
//! them enters `Submitting` again.

use std::{
    collections::HashSet,
    sync::{Mutex, MutexGuard, PoisonError},
};

use maud::{Markup, html};
use uuid::Uuid;

use crate::{Error, alert::Alert, api::ApiError};

/// The notices a workflow shows once its submission resolves.
#[derive(Debug, Clone, Copy)]
pub struct Notices {
    /// Shown when the API accepts the submission.
    pub success: &'static str,
    /// Shown when the API rejects the submission without a message.
    pub failure_fallback: &'static str,
}

/// Where a form is in its submit cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// Nothing has been submitted yet.
    #[default]
    Idle,
    /// Waiting on the finance API.
    Submitting,
    /// The API accepted the last submission.
    Succeeded { message: String },
    /// The API rejected the last submission.
    Failed { message: String },
}

impl SubmissionStatus {
    /// Enter the `Submitting` state.
    ///
    /// # Errors
    ///
    /// Returns [Error::SubmissionInProgress] if a submission is already in
    /// flight.
    pub fn begin(&mut self) -> Result<(), Error> {
        if self.is_submitting() {
            return Err(Error::SubmissionInProgress);
        }

        *self = SubmissionStatus::Submitting;
        Ok(())
    }

    /// Leave the `Submitting` state with the outcome of the API call,
    /// returning the created record on success.
    pub fn resolve<T>(&mut self, outcome: Result<T, ApiError>, notices: Notices) -> Option<T> {
        match outcome {
            Ok(record) => {
                *self = SubmissionStatus::Succeeded {
                    message: notices.success.to_owned(),
                };
                Some(record)
            }
            Err(error) => {
                tracing::error!("submission failed: {error}");
                *self = SubmissionStatus::Failed {
                    message: error.display_message(notices.failure_fallback).to_owned(),
                };
                None
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionStatus::Submitting)
    }

    /// The banner for this state, if any.
    pub fn alert(&self) -> Option<Alert> {
        match self {
            SubmissionStatus::Succeeded { message } => Some(Alert::SuccessSimple {
                message: message.clone(),
            }),
            SubmissionStatus::Failed { message } => Some(Alert::ErrorSimple {
                message: message.clone(),
            }),
            SubmissionStatus::Idle | SubmissionStatus::Submitting => None,
        }
    }

    pub fn banner(&self) -> Markup {
        html! {
            @if let Some(alert) = self.alert() {
                (alert.into_html())
            }
        }
    }
}

/// The forms that have a submission waiting on the finance API.
///
/// Every rendered form carries its own ID, so a form is only blocked by its
/// own pending submission and never by another browser or tab.
#[derive(Debug, Default)]
pub struct InFlightSubmissions {
    forms: Mutex<HashSet<Uuid>>,
}

impl InFlightSubmissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start submitting the form `form_id`, moving `status` to `Submitting`.
    ///
    /// # Errors
    ///
    /// Returns [Error::SubmissionInProgress] while the same form is still
    /// waiting on an earlier submission.
    pub fn begin(
        &self,
        form_id: Uuid,
        status: &mut SubmissionStatus,
    ) -> Result<InFlight<'_>, Error> {
        if !self.lock().insert(form_id) {
            return Err(Error::SubmissionInProgress);
        }

        let in_flight = InFlight {
            submissions: self,
            form_id,
            finished: false,
        };
        status.begin()?;

        Ok(in_flight)
    }

    #[cfg(test)]
    fn is_in_flight(&self, form_id: &Uuid) -> bool {
        self.lock().contains(form_id)
    }

    // The set only holds plain IDs, so a panic elsewhere cannot leave it half
    // written and a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, HashSet<Uuid>> {
        self.forms.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A pending submission. The form is released when this is dropped.
///
/// Dropping it before [InFlight::finish], e.g. when the client disconnects
/// while the API call is pending, is logged.
#[derive(Debug)]
pub struct InFlight<'a> {
    submissions: &'a InFlightSubmissions,
    form_id: Uuid,
    finished: bool,
}

impl InFlight<'_> {
    /// Release the form once its submission has resolved.
    pub fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("submission dropped before the finance API responded");
        }

        self.submissions.lock().remove(&self.form_id);
    }
}
