//! Application form state and its reducer.

use chrono::{DateTime, Utc};
use models::{ContactDetails, ContactPatch, FileDescriptor};
use serde::Serialize;

use crate::{
    attachments::AttachmentList,
    errors::ServiceError,
    submission::{SubmissionPayload, SubmissionReceipt, SubmissionState},
};

/// Everything the application view holds for one visit.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    pub service_id: String,
    pub contact: ContactDetails,
    pub attachments: AttachmentList,
    pub submission: SubmissionState,
    pub opened_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub enum FormAction {
    EditContact(ContactPatch),
    AddFiles(Vec<FileDescriptor>),
    RemoveFile(String),
    BeginSubmit,
    CompleteSubmit(SubmissionReceipt),
}

impl FormAction {
    fn name(&self) -> &'static str {
        match self {
            FormAction::EditContact(_) => "edit_contact",
            FormAction::AddFiles(_) => "add_files",
            FormAction::RemoveFile(_) => "remove_file",
            FormAction::BeginSubmit => "begin_submit",
            FormAction::CompleteSubmit(_) => "complete_submit",
        }
    }
}

impl ApplicationForm {
    pub fn new(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            contact: ContactDetails::default(),
            attachments: AttachmentList::new(),
            submission: SubmissionState::Idle,
            opened_at: Utc::now(),
        }
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        self.submission.is_idle() && self.contact.is_complete()
    }

    pub fn payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            service_id: self.service_id.clone(),
            contact: self.contact.clone(),
            attachment_count: self.attachments.len(),
        }
    }
}

/// Pure state update. Edits are only accepted while the submission is idle.
pub fn reduce(mut form: ApplicationForm, action: FormAction) -> Result<ApplicationForm, ServiceError> {
    let editing = matches!(
        action,
        FormAction::EditContact(_) | FormAction::AddFiles(_) | FormAction::RemoveFile(_)
    );
    if editing && !form.submission.is_idle() {
        return Err(ServiceError::transition(form.submission.label(), action.name()));
    }

    match action {
        FormAction::EditContact(patch) => form.contact.apply(patch),
        FormAction::AddFiles(files) => {
            form.attachments.add(files);
        }
        FormAction::RemoveFile(id) => {
            form.attachments.remove(&id);
        }
        FormAction::BeginSubmit => form.submission = form.submission.begin(&form.contact)?,
        FormAction::CompleteSubmit(receipt) => form.submission = form.submission.complete(receipt)?,
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn filled() -> ApplicationForm {
        let form = ApplicationForm::new("aadhar-update");
        reduce(
            form,
            FormAction::EditContact(ContactPatch {
                full_name: Some("Anita Joshi".into()),
                email: Some("anita@example.com".into()),
                phone: Some("9425000000".into()),
                ..Default::default()
            }),
        )
        .unwrap()
    }

    #[test]
    fn can_submit_tracks_required_fields() {
        let form = ApplicationForm::new("aadhar-update");
        assert!(!form.can_submit());
        assert!(filled().can_submit());
    }

    #[test]
    fn incomplete_form_stays_idle() {
        let form = ApplicationForm::new("aadhar-update");
        let err = reduce(form, FormAction::BeginSubmit).unwrap_err();
        assert!(matches!(err, ServiceError::IncompleteContact(_)));
    }

    #[test]
    fn edits_locked_while_submitting() {
        let form = reduce(filled(), FormAction::BeginSubmit).unwrap();
        assert_eq!(form.submission.label(), "submitting");
        let files = vec![FileDescriptor { name: "x.pdf".into(), size: 1, content_type: "application/pdf".into() }];
        assert!(reduce(form.clone(), FormAction::AddFiles(files)).is_err());
        assert!(reduce(form, FormAction::EditContact(ContactPatch::default())).is_err());
    }

    #[test]
    fn remove_missing_file_leaves_form_unchanged() {
        let files = vec![
            FileDescriptor { name: "a.pdf".into(), size: 10, content_type: "application/pdf".into() },
            FileDescriptor { name: "b.png".into(), size: 20, content_type: "image/png".into() },
        ];
        let form = reduce(filled(), FormAction::AddFiles(files)).unwrap();
        let after = reduce(form.clone(), FormAction::RemoveFile("missing".into())).unwrap();
        assert_eq!(after, form);
    }

    #[test]
    fn full_lifecycle_passes_through_submitting() {
        let submitting = reduce(filled(), FormAction::BeginSubmit).unwrap();
        let receipt = SubmissionReceipt {
            reference: Uuid::new_v4(),
            completed_at: Utc::now(),
            redirect_to: "/".into(),
            attachment_count: 0,
        };
        let done = reduce(submitting, FormAction::CompleteSubmit(receipt)).unwrap();
        assert_eq!(done.submission.label(), "succeeded");
        assert!(!done.can_submit());
    }
}
