//! Issue domain service.
//!
//! Implements the [`IssueCommand`] and [`IssueQuery`] driving ports on top of
//! any [`IssueRepository`]. All request rules live here: required fields and
//! defaults on create, the validation order and sparse patch on update, and
//! filter construction on list.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info, warn};

use crate::domain::issue::non_empty;
use crate::domain::ports::{
    CreateIssueRequest, DeleteIssueRequest, DeleteIssueResponse, IssueCommand, IssueQuery,
    IssueRepository, IssueRepositoryError, ListIssuesRequest, UpdateIssueRequest,
    UpdateIssueResponse,
};
use crate::domain::{
    Error, FilterOutcome, Issue, IssueError, IssueFilter, IssueId, IssuePatch, NewIssue,
};

fn map_repository_error(error: IssueRepositoryError) -> Error {
    match error {
        IssueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("issue store unavailable: {message}"))
        }
        IssueRepositoryError::Query { message } => {
            Error::internal(format!("issue store error: {message}"))
        }
    }
}

/// Issue service backed by a record store and a clock.
#[derive(Clone)]
pub struct IssueService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> IssueService<R> {
    /// Create a service over `repository`, reading time from `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl<R> IssueCommand for IssueService<R>
where
    R: IssueRepository,
{
    async fn create_issue(&self, request: CreateIssueRequest) -> Result<Issue, IssueError> {
        let CreateIssueRequest { project, fields } = request;
        // The project is already validated, so only required fields can fail.
        let new_issue =
            NewIssue::try_new(project, fields.into_new_issue_draft(), self.clock.utc())
                .map_err(|_| IssueError::MissingRequiredFields)?;

        let issue = self.repository.insert(&new_issue).await.map_err(|err| {
            error!(error = %err, project = %new_issue.project(), "issue insert failed");
            IssueError::Service(map_repository_error(err))
        })?;

        info!(issue_id = %issue.id(), project = %issue.project(), "issue created");
        Ok(issue)
    }

    async fn update_issue(
        &self,
        request: UpdateIssueRequest,
    ) -> Result<UpdateIssueResponse, IssueError> {
        let UpdateIssueRequest { id, fields } = request;
        let raw_id = non_empty(id).ok_or(IssueError::MissingId)?;
        let Some(patch) = IssuePatch::from_fields(fields, self.clock.utc()) else {
            return Err(IssueError::NoUpdateFields { id: raw_id });
        };
        let Ok(id) = raw_id.parse::<IssueId>() else {
            debug!(issue_id = %raw_id, "update rejected: malformed issue id");
            return Err(IssueError::CouldNotUpdate { id: raw_id });
        };

        match self.repository.patch(&id, &patch).await {
            Ok(Some(_)) => {
                info!(issue_id = %id, "issue updated");
                Ok(UpdateIssueResponse { id: raw_id })
            }
            Ok(None) => {
                debug!(issue_id = %id, "update rejected: issue not found");
                Err(IssueError::CouldNotUpdate { id: raw_id })
            }
            Err(err) => {
                warn!(issue_id = %id, error = %err, "issue patch failed");
                Err(IssueError::CouldNotUpdate { id: raw_id })
            }
        }
    }

    async fn delete_issue(
        &self,
        request: DeleteIssueRequest,
    ) -> Result<DeleteIssueResponse, IssueError> {
        let raw_id = non_empty(request.id).ok_or(IssueError::MissingId)?;
        let Ok(id) = raw_id.parse::<IssueId>() else {
            debug!(issue_id = %raw_id, "delete rejected: malformed issue id");
            return Err(IssueError::CouldNotDelete { id: raw_id });
        };

        match self.repository.remove(&id).await {
            Ok(Some(_)) => {
                info!(issue_id = %id, "issue deleted");
                Ok(DeleteIssueResponse { id: raw_id })
            }
            Ok(None) => {
                debug!(issue_id = %id, "delete rejected: issue not found");
                Err(IssueError::CouldNotDelete { id: raw_id })
            }
            Err(err) => {
                warn!(issue_id = %id, error = %err, "issue remove failed");
                Err(IssueError::CouldNotDelete { id: raw_id })
            }
        }
    }
}

#[async_trait]
impl<R> IssueQuery for IssueService<R>
where
    R: IssueRepository,
{
    async fn list_issues(&self, request: ListIssuesRequest) -> Result<Vec<Issue>, IssueError> {
        let ListIssuesRequest {
            project,
            id,
            fields,
        } = request;
        let filter = match IssueFilter::from_params(project, id, fields) {
            FilterOutcome::Filter(filter) => filter,
            FilterOutcome::MatchesNothing => {
                debug!("list short-circuited: filter can never match");
                return Ok(Vec::new());
            }
        };

        self.repository.find(&filter).await.map_err(|err| {
            error!(error = %err, project = %filter.project(), "issue find failed");
            IssueError::Service(map_repository_error(err))
        })
    }
}

#[cfg(test)]
#[path = "issue_service_tests.rs"]
mod tests;
