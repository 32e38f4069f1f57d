//! Process-local `IssueRepository` used when no database is configured.
//!
//! Issues are kept in insertion order behind a mutex. Nothing survives a
//! restart.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{IssueRepository, IssueRepositoryError};
use crate::domain::{Issue, IssueFilter, IssueId, IssuePatch, NewIssue};

/// Mutex-guarded issue list.
#[derive(Debug, Default)]
pub struct InMemoryIssueRepository {
    issues: Mutex<Vec<Issue>>,
}

impl InMemoryIssueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Issue>>, IssueRepositoryError> {
        self.issues
            .lock()
            .map_err(|_| IssueRepositoryError::query("in-memory issue store poisoned"))
    }
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn find(&self, filter: &IssueFilter) -> Result<Vec<Issue>, IssueRepositoryError> {
        let issues = self.lock()?;
        Ok(issues
            .iter()
            .filter(|issue| filter.matches(issue))
            .cloned()
            .collect())
    }

    async fn insert(&self, issue: &NewIssue) -> Result<Issue, IssueRepositoryError> {
        let mut issues = self.lock()?;
        let mut id = IssueId::random();
        while issues.iter().any(|existing| existing.id() == id) {
            id = IssueId::random();
        }
        let stored = issue.clone().into_issue(id);
        issues.push(stored.clone());
        Ok(stored)
    }

    async fn patch(
        &self,
        id: &IssueId,
        patch: &IssuePatch,
    ) -> Result<Option<Issue>, IssueRepositoryError> {
        let mut issues = self.lock()?;
        Ok(issues
            .iter_mut()
            .find(|issue| issue.id() == *id)
            .map(|issue| {
                issue.apply(patch);
                issue.clone()
            }))
    }

    async fn remove(&self, id: &IssueId) -> Result<Option<Issue>, IssueRepositoryError> {
        let mut issues = self.lock()?;
        Ok(issues
            .iter()
            .position(|issue| issue.id() == *id)
            .map(|index| issues.remove(index)))
    }
}
