//! Failures of the issue operations.
//!
//! Most variants are part of the client contract: the HTTP adapter reports
//! them with status 200 and an `error` key, echoing `_id` where one was sent.
//! [`IssueError::Service`] wraps everything the contract does not cover.

use crate::domain::Error;

/// Outcome of a rejected or failed issue operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IssueError {
    /// Create was called without `issue_title`, `issue_text`, or `created_by`.
    #[error("required field(s) missing")]
    MissingRequiredFields,
    /// Update or delete was called without `_id`.
    #[error("missing _id")]
    MissingId,
    /// Update carried `_id` but no field to change.
    #[error("no update field(s) sent")]
    NoUpdateFields { id: String },
    /// Update found nothing to patch (unknown id, malformed id, or store failure).
    #[error("could not update")]
    CouldNotUpdate { id: String },
    /// Delete found nothing to remove (unknown id, malformed id, or store failure).
    #[error("could not delete")]
    CouldNotDelete { id: String },
    /// Failure outside the body-level contract.
    #[error(transparent)]
    Service(#[from] Error),
}

impl IssueError {
    /// The `_id` echoed back to the client, when the variant carries one.
    ///
    /// # Examples
    /// ```
    /// use issue_tracker::domain::IssueError;
    ///
    /// let err = IssueError::CouldNotDelete { id: "fail".into() };
    /// assert_eq!(err.echoed_id(), Some("fail"));
    /// assert_eq!(IssueError::MissingId.echoed_id(), None);
    /// ```
    pub fn echoed_id(&self) -> Option<&str> {
        match self {
            Self::NoUpdateFields { id } | Self::CouldNotUpdate { id } | Self::CouldNotDelete { id } => {
                Some(id.as_str())
            }
            Self::MissingRequiredFields | Self::MissingId | Self::Service(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(IssueError::MissingRequiredFields, "required field(s) missing")]
    #[case(IssueError::MissingId, "missing _id")]
    #[case(IssueError::NoUpdateFields { id: "x".into() }, "no update field(s) sent")]
    #[case(IssueError::CouldNotUpdate { id: "x".into() }, "could not update")]
    #[case(IssueError::CouldNotDelete { id: "x".into() }, "could not delete")]
    fn messages_match_client_contract(#[case] error: IssueError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn service_errors_are_transparent() {
        let error = IssueError::from(Error::service_unavailable("store down"));
        assert_eq!(error.to_string(), "store down");
        assert!(error.echoed_id().is_none());
    }
}
