//! Simulated submission: `idle -> submitting -> succeeded`.
//!
//! The state transitions are pure functions on [`SubmissionState`]. The work done
//! between `submitting` and `succeeded` sits behind the [`Submitter`] trait; the
//! only implementation today waits a fixed delay and never fails.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use models::ContactDetails;
use serde::Serialize;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Where the caller is sent after a successful submission.
pub const SUCCESS_REDIRECT: &str = "/";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub reference: Uuid,
    pub completed_at: DateTime<Utc>,
    pub redirect_to: String,
    pub attachment_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
#[non_exhaustive]
pub enum SubmissionState {
    Idle,
    Submitting {
        #[serde(rename = "startedAt")]
        started_at: DateTime<Utc>,
    },
    Succeeded { receipt: SubmissionReceipt },
}

impl Default for SubmissionState {
    fn default() -> Self { SubmissionState::Idle }
}

impl SubmissionState {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting { .. } => "submitting",
            SubmissionState::Succeeded { .. } => "succeeded",
        }
    }

    /// The form is editable only while idle.
    pub fn is_idle(&self) -> bool { matches!(self, SubmissionState::Idle) }

    /// `idle -> submitting`, guarded by the presence of the required contact fields.
    pub fn begin(&self, contact: &ContactDetails) -> Result<SubmissionState, ServiceError> {
        if !self.is_idle() {
            return Err(ServiceError::transition(self.label(), "submitting"));
        }
        let missing = contact.missing_fields();
        if !missing.is_empty() {
            return Err(ServiceError::IncompleteContact(missing));
        }
        Ok(SubmissionState::Submitting { started_at: Utc::now() })
    }

    /// `submitting -> succeeded`. Any other source state is rejected.
    pub fn complete(&self, receipt: SubmissionReceipt) -> Result<SubmissionState, ServiceError> {
        match self {
            SubmissionState::Submitting { .. } => Ok(SubmissionState::Succeeded { receipt }),
            other => Err(ServiceError::transition(other.label(), "succeeded")),
        }
    }
}

/// What the submitter gets to see. Attachments are reported by count only.
#[derive(Clone, Debug)]
pub struct SubmissionPayload {
    pub service_id: String,
    pub contact: ContactDetails,
    pub attachment_count: usize,
}

#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, payload: SubmissionPayload) -> Result<SubmissionReceipt, ServiceError>;
}

/// Waits `delay`, then succeeds. No network, no retry.
#[derive(Clone, Debug)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self { Self { delay } }

    pub fn delay(&self) -> Duration { self.delay }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, payload: SubmissionPayload) -> Result<SubmissionReceipt, ServiceError> {
        tokio::time::sleep(self.delay).await;
        Ok(SubmissionReceipt {
            reference: Uuid::new_v4(),
            completed_at: Utc::now(),
            redirect_to: SUCCESS_REDIRECT.to_string(),
            attachment_count: payload.attachment_count,
        })
    }
}

/// Run `submitter` in the background and hand its outcome to `on_complete` exactly once.
pub fn spawn_submission<F>(
    submitter: Arc<dyn Submitter>,
    payload: SubmissionPayload,
    on_complete: F,
) -> JoinHandle<()>
where
    F: FnOnce(Result<SubmissionReceipt, ServiceError>) + Send + 'static,
{
    tokio::spawn(async move {
        let outcome = submitter.submit(payload).await;
        on_complete(outcome);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactDetails {
        ContactDetails {
            full_name: "Ravi Tiwari".into(),
            email: "ravi@example.com".into(),
            phone: "9826012345".into(),
            ..Default::default()
        }
    }

    fn receipt() -> SubmissionReceipt {
        SubmissionReceipt {
            reference: Uuid::new_v4(),
            completed_at: Utc::now(),
            redirect_to: SUCCESS_REDIRECT.into(),
            attachment_count: 0,
        }
    }

    #[test]
    fn begin_requires_contact_fields() {
        let err = SubmissionState::Idle.begin(&ContactDetails::default()).unwrap_err();
        match err {
            ServiceError::IncompleteContact(missing) => assert_eq!(missing, vec!["fullName", "email", "phone"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cannot_succeed_without_submitting() {
        assert!(SubmissionState::Idle.complete(receipt()).is_err());
        let submitting = SubmissionState::Idle.begin(&contact()).unwrap();
        assert_eq!(submitting.label(), "submitting");
        let done = submitting.complete(receipt()).unwrap();
        assert_eq!(done.label(), "succeeded");
        assert!(done.complete(receipt()).is_err());
        assert!(done.begin(&contact()).is_err());
    }

    #[test]
    fn double_begin_rejected() {
        let submitting = SubmissionState::Idle.begin(&contact()).unwrap();
        assert!(matches!(submitting.begin(&contact()), Err(ServiceError::InvalidTransition { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_submitter_completes_after_delay() {
        let submitter: Arc<dyn Submitter> = Arc::new(SimulatedSubmitter::new(Duration::from_millis(2000)));
        let (tx, rx) = tokio::sync::oneshot::channel();
        let payload = SubmissionPayload { service_id: "aadhar-update".into(), contact: contact(), attachment_count: 2 };
        let start = tokio::time::Instant::now();
        spawn_submission(submitter, payload, move |res| {
            let _ = tx.send(res);
        });
        let receipt = rx.await.unwrap().unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(receipt.redirect_to, "/");
        assert_eq!(receipt.attachment_count, 2);
    }
}
