//! Form submission

use crate::accessor::FormAccessor;
use crate::runtime::Runtime;
use async_trait::async_trait;
use serde::Serialize;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("submission failed: {0}")]
    Transport(String),
}

/// Flat name → value mapping of a form's controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormPayload(BTreeMap<String, String>);

impl FormPayload {
    /// Later entries overwrite earlier ones with the same name
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self(entries.into_iter().collect())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Where a valid form's data is sent
#[async_trait(?Send)]
pub trait Submitter {
    async fn submit(&self, payload: &FormPayload) -> Result<(), SubmitError>;
}

/// Stands in for a network call: waits, then succeeds (or fails, when built
/// with [`failing`](Self::failing))
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter<R> {
    runtime: R,
    delay: Duration,
    failure: Option<String>,
}

impl<R: Runtime> SimulatedSubmitter<R> {
    pub fn new(runtime: R, delay: Duration) -> Self {
        Self {
            runtime,
            delay,
            failure: None,
        }
    }

    /// A submitter whose every submission fails with `reason` after the delay
    pub fn failing(runtime: R, delay: Duration, reason: impl Into<String>) -> Self {
        Self {
            runtime,
            delay,
            failure: Some(reason.into()),
        }
    }
}

#[async_trait(?Send)]
impl<R: Runtime> Submitter for SimulatedSubmitter<R> {
    async fn submit(&self, payload: &FormPayload) -> Result<(), SubmitError> {
        debug!(fields = payload.len(), delay_ms = self.delay.as_millis() as u64, "simulating submission");
        self.runtime.sleep(self.delay).await;

        match &self.failure {
            Some(reason) => Err(SubmitError::Transport(reason.clone())),
            None => Ok(()),
        }
    }
}

/// Holds the submit control disabled for the lifetime of a submission.
///
/// Dropping the guard re-enables the control and restores its label on
/// every path out of the submission, including early returns and panics
/// unwinding through the handler.
pub(crate) struct BusySubmit<'a, A: FormAccessor + ?Sized> {
    form: &'a A,
    original_label: Option<String>,
    in_flight: &'a Cell<bool>,
}

impl<'a, A: FormAccessor + ?Sized> BusySubmit<'a, A> {
    pub(crate) fn engage(form: &'a A, loading_label: &str, in_flight: &'a Cell<bool>) -> Self {
        in_flight.set(true);
        let original_label = form.submit_label();
        if original_label.is_some() {
            form.set_submit_control(true, loading_label);
        }
        Self {
            form,
            original_label,
            in_flight,
        }
    }
}

impl<A: FormAccessor + ?Sized> Drop for BusySubmit<'_, A> {
    fn drop(&mut self) {
        if let Some(label) = &self.original_label {
            self.form.set_submit_control(false, label);
        }
        self.in_flight.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_payload_last_value_wins() {
        let payload = FormPayload::from_entries(vec![
            ("topic".to_string(), "orders".to_string()),
            ("name".to_string(), "Asha".to_string()),
            ("topic".to_string(), "returns".to_string()),
        ]);
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("topic"), Some("returns"));
        assert_eq!(payload.get("name"), Some("Asha"));
        assert_eq!(payload.get("missing"), None);
    }

    #[cfg(feature = "tokio")]
    #[tokio::test(start_paused = true)]
    async fn test_simulated_submitter_outcomes() {
        use crate::runtime::TokioRuntime;

        let delay = Duration::from_millis(1500);
        let ok = SimulatedSubmitter::new(TokioRuntime, delay);
        let started = tokio::time::Instant::now();
        assert_eq!(ok.submit(&FormPayload::default()).await, Ok(()));
        assert!(started.elapsed() >= delay);

        let broken = SimulatedSubmitter::failing(TokioRuntime, delay, "offline");
        assert_eq!(
            broken.submit(&FormPayload::default()).await,
            Err(SubmitError::Transport("offline".into()))
        );
    }
}
