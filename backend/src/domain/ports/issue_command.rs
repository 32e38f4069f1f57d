//! Driving port for issue mutations: create, update, delete.

use async_trait::async_trait;

use crate::domain::{Issue, IssueError, IssueFields, ProjectName};

/// Request to create an issue in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssueRequest {
    pub project: ProjectName,
    pub fields: IssueFields,
}

/// Request to patch an issue.
///
/// `id` is the raw `_id` the client sent; it is echoed back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateIssueRequest {
    pub id: Option<String>,
    pub fields: IssueFields,
}

/// Successful update acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateIssueResponse {
    pub id: String,
}

/// Request to delete an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteIssueRequest {
    pub id: Option<String>,
}

/// Successful delete acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteIssueResponse {
    pub id: String,
}

/// Driving port for issue write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueCommand: Send + Sync {
    /// Validate and store a new issue.
    ///
    /// Fails with [`IssueError::MissingRequiredFields`] when `issue_title`,
    /// `issue_text`, or `created_by` is missing or empty.
    async fn create_issue(&self, request: CreateIssueRequest) -> Result<Issue, IssueError>;

    /// Apply a sparse patch to an existing issue.
    ///
    /// Validation order: missing `_id`, then no update field, then the store
    /// lookup. Unknown and malformed ids both yield
    /// [`IssueError::CouldNotUpdate`].
    async fn update_issue(
        &self,
        request: UpdateIssueRequest,
    ) -> Result<UpdateIssueResponse, IssueError>;

    /// Remove an issue.
    ///
    /// Unknown and malformed ids both yield [`IssueError::CouldNotDelete`].
    async fn delete_issue(
        &self,
        request: DeleteIssueRequest,
    ) -> Result<DeleteIssueResponse, IssueError>;
}
