//! Application sessions: one form state per visit of the application view.
//!
//! Each mutation clones the session, runs the reducer and writes the result back
//! while the map entry is locked. A session leaves the store when it is
//! discarded, when its receipt has been read once, or when it sits idle longer
//! than the configured time-to-idle.

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use common::metrics::{
    SESSIONS_EVICTED_TOTAL, SESSIONS_OPENED_TOTAL, SUBMISSIONS_COMPLETED_TOTAL, SUBMISSIONS_STARTED_TOTAL,
};
use dashmap::DashMap;
use models::Service;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    application::{reduce, ApplicationForm, FormAction},
    errors::ServiceError,
    submission::{spawn_submission, SubmissionState, Submitter},
};

struct SessionEntry {
    form: ApplicationForm,
    last_seen: Instant,
}

impl SessionEntry {
    fn new(form: ApplicationForm) -> Self {
        Self { form, last_seen: Instant::now() }
    }
}

pub struct ApplicationSessions {
    inner: DashMap<Uuid, SessionEntry>,
    submitter: Arc<dyn Submitter>,
}

impl ApplicationSessions {
    pub fn new(submitter: Arc<dyn Submitter>) -> Arc<Self> {
        Arc::new(Self { inner: DashMap::new(), submitter })
    }

    pub fn open(&self, service: &Service) -> (Uuid, ApplicationForm) {
        let id = Uuid::new_v4();
        let form = ApplicationForm::new(service.id.clone());
        self.inner.insert(id, SessionEntry::new(form.clone()));
        SESSIONS_OPENED_TOTAL.inc();
        info!(session_id = %id, service_id = %service.id, "application session opened");
        (id, form)
    }

    /// Current snapshot. A succeeded session is handed out once with its
    /// receipt and then removed.
    pub fn get(&self, id: Uuid) -> Result<ApplicationForm, ServiceError> {
        if let Some((_, entry)) =
            self.inner.remove_if(&id, |_, entry| matches!(entry.form.submission, SubmissionState::Succeeded { .. }))
        {
            debug!(session_id = %id, "receipt delivered, application session closed");
            return Ok(entry.form);
        }
        let mut entry = self
            .inner
            .get_mut(&id)
            .ok_or_else(|| ServiceError::not_found("application session"))?;
        entry.last_seen = Instant::now();
        Ok(entry.form.clone())
    }

    pub fn dispatch(&self, id: Uuid, action: FormAction) -> Result<ApplicationForm, ServiceError> {
        let mut entry = self
            .inner
            .get_mut(&id)
            .ok_or_else(|| ServiceError::not_found("application session"))?;
        let next = reduce(entry.form.clone(), action)?;
        entry.form = next.clone();
        entry.last_seen = Instant::now();
        Ok(next)
    }

    /// Move the session to `submitting` and complete it in the background.
    ///
    /// Returns the `submitting` snapshot immediately.
    pub fn submit(self: &Arc<Self>, id: Uuid) -> Result<ApplicationForm, ServiceError> {
        let form = self.dispatch(id, FormAction::BeginSubmit)?;
        SUBMISSIONS_STARTED_TOTAL.inc();
        info!(session_id = %id, service_id = %form.service_id, attachments = form.attachments.len(), "submission started");

        let sessions = Arc::clone(self);
        spawn_submission(Arc::clone(&self.submitter), form.payload(), move |outcome| match outcome {
            Ok(receipt) => match sessions.dispatch(id, FormAction::CompleteSubmit(receipt)) {
                Ok(done) => {
                    SUBMISSIONS_COMPLETED_TOTAL.inc();
                    info!(session_id = %id, service_id = %done.service_id, "submission succeeded");
                }
                // session discarded or evicted while the delay was running
                Err(ServiceError::NotFound(_)) => debug!(session_id = %id, "submission finished for discarded session"),
                Err(e) => warn!(session_id = %id, error = %e, "submission completion rejected"),
            },
            Err(e) => warn!(session_id = %id, error = %e, "submitter failed"),
        });
        Ok(form)
    }

    /// Navigation away: drop the session and its attachments.
    pub fn discard(&self, id: Uuid) -> bool {
        let existed = self.inner.remove(&id).is_some();
        if existed {
            debug!(session_id = %id, "application session discarded");
        }
        existed
    }

    /// Drop every session untouched for longer than `idle`. Returns how many went.
    pub fn evict_idle(&self, idle: Duration) -> usize {
        let before = self.inner.len();
        let now = Instant::now();
        self.inner.retain(|_, entry| now.duration_since(entry.last_seen) <= idle);
        let evicted = before.saturating_sub(self.inner.len());
        if evicted > 0 {
            SESSIONS_EVICTED_TOTAL.inc_by(evicted as u64);
            info!(evicted, remaining = self.inner.len(), "idle application sessions evicted");
        }
        evicted
    }

    /// Background sweep running `evict_idle` every `period`; stops once the
    /// store itself has been dropped.
    pub fn spawn_idle_sweeper(self: &Arc<Self>, idle: Duration, period: Duration) -> tokio::task::JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(period);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tick.tick().await;
                match weak.upgrade() {
                    Some(sessions) => {
                        sessions.evict_idle(idle);
                    }
                    None => break,
                }
            }
        })
    }

    pub fn len(&self) -> usize { self.inner.len() }

    pub fn is_empty(&self) -> bool { self.inner.is_empty() }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use models::{ContactPatch, FileDescriptor};

    use super::*;
    use crate::{catalog::Catalog, submission::SimulatedSubmitter};

    const DELAY: Duration = Duration::from_millis(2000);

    fn sessions() -> Arc<ApplicationSessions> {
        ApplicationSessions::new(Arc::new(SimulatedSubmitter::new(DELAY)))
    }

    fn open(sessions: &ApplicationSessions) -> Uuid {
        let catalog = Catalog::builtin().unwrap();
        sessions.open(catalog.lookup("aadhar-update").unwrap()).0
    }

    fn fill(sessions: &ApplicationSessions, id: Uuid) {
        sessions
            .dispatch(
                id,
                FormAction::EditContact(ContactPatch {
                    full_name: Some("Sanjay Mishra".into()),
                    email: Some("sanjay@example.com".into()),
                    phone: Some("9893000000".into()),
                    ..Default::default()
                }),
            )
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn submit_goes_through_submitting_then_succeeds() {
        let sessions = sessions();
        let id = open(&sessions);
        fill(&sessions, id);
        sessions
            .dispatch(id, FormAction::AddFiles(vec![FileDescriptor { name: "id.pdf".into(), size: 5, content_type: "application/pdf".into() }]))
            .unwrap();

        let snapshot = sessions.submit(id).unwrap();
        assert_eq!(snapshot.submission.label(), "submitting");
        assert_eq!(sessions.get(id).unwrap().submission.label(), "submitting");

        tokio::time::sleep(DELAY / 2).await;
        assert_eq!(sessions.get(id).unwrap().submission.label(), "submitting");

        tokio::time::sleep(DELAY).await;
        let done = sessions.get(id).unwrap();
        assert_eq!(done.submission.label(), "succeeded");
        match done.submission {
            crate::submission::SubmissionState::Succeeded { receipt } => {
                assert_eq!(receipt.redirect_to, "/");
                assert_eq!(receipt.attachment_count, 1);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test]
    async fn incomplete_contact_does_not_start_submission() {
        let sessions = sessions();
        let id = open(&sessions);
        assert!(matches!(sessions.submit(id), Err(ServiceError::IncompleteContact(_))));
        assert_eq!(sessions.get(id).unwrap().submission.label(), "idle");
    }

    #[tokio::test(start_paused = true)]
    async fn discard_during_delay_is_harmless() {
        let sessions = sessions();
        let id = open(&sessions);
        fill(&sessions, id);
        sessions.submit(id).unwrap();
        assert!(sessions.discard(id));
        tokio::time::sleep(DELAY * 2).await;
        assert!(sessions.is_empty());
        assert!(!sessions.discard(id));
    }

    #[tokio::test(start_paused = true)]
    async fn receipt_is_read_once_then_session_is_gone() {
        let sessions = sessions();
        let id = open(&sessions);
        fill(&sessions, id);
        sessions.submit(id).unwrap();
        tokio::time::sleep(DELAY * 2).await;

        assert_eq!(sessions.get(id).unwrap().submission.label(), "succeeded");
        assert!(sessions.is_empty());
        assert!(matches!(sessions.get(id), Err(ServiceError::NotFound(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_are_swept() {
        let sessions = sessions();
        let idle = Duration::from_secs(30 * 60);
        let _sweeper = sessions.spawn_idle_sweeper(idle, Duration::from_secs(60));

        for _ in 0..1000 {
            let id = open(&sessions);
            fill(&sessions, id);
            sessions.submit(id).unwrap();
        }
        assert_eq!(sessions.len(), 1000);

        // completed but never collected, then abandoned
        tokio::time::sleep(Duration::from_secs(60 * 60)).await;
        assert!(sessions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn recently_used_sessions_survive_eviction() {
        let sessions = sessions();
        let stale = open(&sessions);
        tokio::time::sleep(Duration::from_secs(20 * 60)).await;
        let fresh = open(&sessions);
        tokio::time::sleep(Duration::from_secs(15 * 60)).await;
        sessions.get(fresh).unwrap();

        assert_eq!(sessions.evict_idle(Duration::from_secs(30 * 60)), 1);
        assert!(matches!(sessions.get(stale), Err(ServiceError::NotFound(_))));
        assert!(sessions.get(fresh).is_ok());
    }

    #[tokio::test]
    async fn whitespace_contact_is_enough_to_submit() {
        let sessions = sessions();
        let id = open(&sessions);
        let patch = ContactPatch { full_name: Some(" ".into()), email: Some(" ".into()), phone: Some(" ".into()), ..Default::default() };
        sessions.dispatch(id, FormAction::EditContact(patch)).unwrap();
        assert_eq!(sessions.submit(id).unwrap().submission.label(), "submitting");
    }

    #[test]
    fn unknown_session_is_not_found() {
        let sessions = sessions();
        assert!(matches!(sessions.get(Uuid::new_v4()), Err(ServiceError::NotFound(_))));
    }
}
