//! Driven port for the issue record store.
//!
//! The store knows nothing about request validation. It runs equality
//! filters, inserts validated issues (assigning their identifiers), and
//! patches or removes records by id.

use async_trait::async_trait;

use crate::domain::{Issue, IssueFilter, IssueId, IssuePatch, NewIssue};

use super::define_port_error;

define_port_error! {
    /// Errors raised by issue repository adapters.
    pub enum IssueRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "issue repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "issue repository query failed: {message}",
    }
}

/// Record store for issues.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Return every issue matching `filter`, oldest first.
    async fn find(&self, filter: &IssueFilter) -> Result<Vec<Issue>, IssueRepositoryError>;

    /// Store a new issue and return it with its assigned identifier.
    async fn insert(&self, issue: &NewIssue) -> Result<Issue, IssueRepositoryError>;

    /// Apply `patch` to the issue with `id`; `Ok(None)` when no such issue exists.
    async fn patch(
        &self,
        id: &IssueId,
        patch: &IssuePatch,
    ) -> Result<Option<Issue>, IssueRepositoryError>;

    /// Delete the issue with `id`; `Ok(None)` when no such issue exists.
    async fn remove(&self, id: &IssueId) -> Result<Option<Issue>, IssueRepositoryError>;
}
