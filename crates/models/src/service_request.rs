use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Processing,
    Completed,
    Rejected,
    Submitted,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 5] = [
        RequestStatus::Pending,
        RequestStatus::Processing,
        RequestStatus::Completed,
        RequestStatus::Rejected,
        RequestStatus::Submitted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Processing => "processing",
            RequestStatus::Completed => "completed",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Submitted => "submitted",
        }
    }

    /// Actions offered on the admin board: pending requests can be started or
    /// rejected, processing requests can be completed.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Processing)
                | (RequestStatus::Processing, RequestStatus::Completed)
                | (RequestStatus::Pending, RequestStatus::Rejected)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::Validation(format!("unknown status: {s}")))
    }
}

/// A mock customer submission shown on the admin board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub service_title: String,
    pub service_category: String,
    pub status: RequestStatus,
    pub submitted_date: NaiveDate,
    pub amount: u32,
    pub document_count: u32,
}

pub fn parse_requests(json: &str) -> Result<Vec<ServiceRequest>, ModelError> {
    serde_json::from_str(json).map_err(|e| ModelError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_observed_transitions_allowed() {
        use RequestStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Rejected.can_transition_to(Processing));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Submitted.can_transition_to(Processing));
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Processing".parse::<RequestStatus>().unwrap(), RequestStatus::Processing);
        assert!("archived".parse::<RequestStatus>().is_err());
    }
}
