//! Driving port for reading issues.

use async_trait::async_trait;

use crate::domain::{Issue, IssueError, IssueFields, ProjectName};

/// Request to list a project's issues.
///
/// `id` and `fields` are raw query parameters; empty values are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListIssuesRequest {
    pub project: ProjectName,
    pub id: Option<String>,
    pub fields: IssueFields,
}

impl ListIssuesRequest {
    /// List every issue of `project`.
    pub fn all(project: ProjectName) -> Self {
        Self {
            project,
            id: None,
            fields: IssueFields::default(),
        }
    }
}

/// Driving port for issue read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueQuery: Send + Sync {
    /// Return the project's issues matching the request's filters.
    ///
    /// An unmatched filter is a successful, empty result.
    async fn list_issues(&self, request: ListIssuesRequest) -> Result<Vec<Issue>, IssueError>;
}
