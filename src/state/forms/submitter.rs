//! Asynchronous form submission
//!
//! Owns the processing flag and the last field errors. A post spawns the
//! request and returns immediately; the event loop calls [`FormSubmitter::poll`]
//! each tick to pick up the result.

use super::form_state::{FieldErrors, ProvinceForm};
use crate::backend::{BackendClientTrait, BackendError, SubmitOutcome};
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};

type PendingResult = oneshot::Receiver<Result<SubmitOutcome, BackendError>>;

#[derive(Debug, Default)]
pub struct FormSubmitter {
    processing: bool,
    errors: FieldErrors,
    pending: Option<PendingResult>,
}

impl FormSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_errors(errors: FieldErrors) -> Self {
        Self {
            errors,
            ..Self::default()
        }
    }

    /// True while a request is in flight
    pub fn processing(&self) -> bool {
        self.processing
    }

    /// Field errors from the last completed submission
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Send `data` to `path` in the background.
    ///
    /// There is no in-flight check here: a second post replaces the pending
    /// receiver and the earlier response is dropped when it arrives.
    pub fn post(&mut self, client: Arc<dyn BackendClientTrait>, path: String, data: ProvinceForm) {
        let (tx, rx) = oneshot::channel();
        self.processing = true;
        self.pending = Some(rx);

        tracing::info!(path = %path, code = %data.code, "Submitting province");

        tokio::spawn(async move {
            let result = client.store_province(&path, &data).await;
            // Receiver is gone if the page was left mid-request
            let _ = tx.send(result);
        });
    }

    /// Check for a finished request without blocking.
    ///
    /// Validation failures replace the stored errors, a redirect clears them.
    /// Transport failures are logged and leave the errors as they were.
    pub fn poll(&mut self) -> Option<SubmitOutcome> {
        let rx = self.pending.as_mut()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => {
                tracing::warn!("Submission task ended without a response");
                self.finish();
                return None;
            }
        };
        self.finish();

        match result {
            Ok(SubmitOutcome::Invalid(errors)) => {
                tracing::debug!("Submission rejected with {} field error(s)", errors.len());
                self.errors = errors.clone();
                Some(SubmitOutcome::Invalid(errors))
            }
            Ok(outcome) => {
                if !self.errors.is_empty() {
                    tracing::debug!("Clearing {} field error(s)", self.errors.len());
                }
                self.errors = FieldErrors::default();
                Some(outcome)
            }
            Err(e) => {
                tracing::warn!("Submission failed: {e}");
                None
            }
        }
    }

    fn finish(&mut self) {
        self.pending = None;
        self.processing = false;
    }
}
