use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{DocMatchError, Result},
    service::account::Account,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Admin verdict on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

/// A user's request for extra scan credits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRequest {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub requested_at: DateTime<Utc>,
    pub status: RequestStatus,
    pub requested_credits: u32,
}

impl CreditRequest {
    /// New pending request
    pub fn new(account: &Account, requested_credits: u32) -> Result<Self> {
        if requested_credits == 0 {
            return Err(DocMatchError::InvalidCreditAmount(requested_credits));
        }
        Ok(CreditRequest {
            id: Uuid::new_v4().to_string(),
            user_id: account.id.clone(),
            user_name: account.name.clone(),
            requested_at: Utc::now(),
            status: RequestStatus::Pending,
            requested_credits,
        })
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Move out of `Pending`; a request is resolved at most once
    pub fn resolve(&mut self, decision: Decision) -> Result<RequestStatus> {
        if !self.is_pending() {
            return Err(DocMatchError::RequestAlreadyResolved {
                id: self.id.clone(),
                status: self.status,
            });
        }
        self.status = match decision {
            Decision::Approve => RequestStatus::Approved,
            Decision::Reject => RequestStatus::Rejected,
        };
        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new("u1", "User One", false, 0)
    }

    #[test]
    fn new_request_is_pending() {
        let req = CreditRequest::new(&account(), 10).unwrap();
        assert!(req.is_pending());
        assert_eq!(req.user_name, "User One");
        assert_eq!(req.requested_credits, 10);
    }

    #[test]
    fn zero_amount_rejected() {
        let err = CreditRequest::new(&account(), 0).unwrap_err();
        assert!(matches!(err, DocMatchError::InvalidCreditAmount(0)));
    }

    #[test]
    fn resolves_once() {
        let mut req = CreditRequest::new(&account(), 5).unwrap();
        assert_eq!(req.resolve(Decision::Reject).unwrap(), RequestStatus::Rejected);
        let err = req.resolve(Decision::Approve).unwrap_err();
        assert!(matches!(
            err,
            DocMatchError::RequestAlreadyResolved { status: RequestStatus::Rejected, .. }
        ));
        assert_eq!(req.status, RequestStatus::Rejected);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RequestStatus::Approved).unwrap(), "\"approved\"");
        assert_eq!(RequestStatus::Pending.to_string(), "pending");
    }
}
