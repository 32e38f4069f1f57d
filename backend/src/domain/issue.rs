//! Issue entity and its identifiers.
//!
//! An [`Issue`] is the only persisted record. It belongs to exactly one
//! project, chosen at creation and never changed afterwards.
//!
//! Creation rules live on [`NewIssue`]: the three required text fields must be
//! non-empty and the optional ones default to `""`. A stored [`Issue`] does not
//! re-check those rules because updates are allowed to blank them out.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::IssuePatch;

/// Validation errors raised by issue constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IssueValidationError {
    /// The identifier is not a store identifier (a UUID).
    #[error("issue id must be a valid UUID")]
    InvalidId,
    /// The project path segment was empty.
    #[error("project name must not be empty")]
    EmptyProject,
    /// One of `issue_title`, `issue_text`, `created_by` was missing or empty.
    #[error("required field(s) missing")]
    MissingRequiredFields,
    /// `updated_on` precedes `created_on`.
    #[error("updated_on must not precede created_on")]
    UpdatedBeforeCreated,
}

/// Store-assigned issue identifier.
///
/// Serialised as the hyphenated UUID string clients send back as `_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssueId(Uuid);

impl IssueId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for IssueId {
    type Err = IssueValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| IssueValidationError::InvalidId)
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Project partition key taken from the request path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate and construct a project name.
    ///
    /// # Examples
    /// ```
    /// use issue_tracker::domain::ProjectName;
    ///
    /// let project = ProjectName::new("apitest").expect("valid project");
    /// assert_eq!(project.as_str(), "apitest");
    /// assert!(ProjectName::new("").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, IssueValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IssueValidationError::EmptyProject);
        }
        Ok(Self(value))
    }

    /// Borrow the raw project name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Treat empty strings the same as absent values.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// A validated issue that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIssue {
    project: ProjectName,
    issue_title: String,
    issue_text: String,
    created_by: String,
    assigned_to: String,
    status_text: String,
    created_on: DateTime<Utc>,
}

/// Raw creation input for [`NewIssue::try_new`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewIssueDraft {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
}

impl NewIssue {
    /// Validate creation input, defaulting the optional fields to `""`.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use issue_tracker::domain::{NewIssue, NewIssueDraft, ProjectName};
    ///
    /// let draft = NewIssueDraft {
    ///     issue_title: Some("title".into()),
    ///     issue_text: Some("text".into()),
    ///     created_by: Some("creator".into()),
    ///     ..NewIssueDraft::default()
    /// };
    /// let issue = NewIssue::try_new(ProjectName::new("apitest").expect("project"), draft, Utc::now())
    ///     .expect("valid issue");
    /// assert_eq!(issue.assigned_to(), "");
    /// assert!(issue.open());
    /// ```
    pub fn try_new(
        project: ProjectName,
        draft: NewIssueDraft,
        created_on: DateTime<Utc>,
    ) -> Result<Self, IssueValidationError> {
        let NewIssueDraft {
            issue_title,
            issue_text,
            created_by,
            assigned_to,
            status_text,
        } = draft;

        let (Some(issue_title), Some(issue_text), Some(created_by)) = (
            non_empty(issue_title),
            non_empty(issue_text),
            non_empty(created_by),
        ) else {
            return Err(IssueValidationError::MissingRequiredFields);
        };

        Ok(Self {
            project,
            issue_title,
            issue_text,
            created_by,
            assigned_to: assigned_to.unwrap_or_default(),
            status_text: status_text.unwrap_or_default(),
            created_on,
        })
    }

    pub fn project(&self) -> &ProjectName {
        &self.project
    }

    pub fn issue_title(&self) -> &str {
        &self.issue_title
    }

    pub fn issue_text(&self) -> &str {
        &self.issue_text
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn assigned_to(&self) -> &str {
        &self.assigned_to
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// New issues always start open.
    pub fn open(&self) -> bool {
        true
    }

    /// Creation timestamp, also used as the initial `updated_on`.
    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    /// Attach the store-assigned identifier.
    pub fn into_issue(self, id: IssueId) -> Issue {
        Issue {
            id,
            project: self.project,
            issue_title: self.issue_title,
            issue_text: self.issue_text,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            status_text: self.status_text,
            open: true,
            created_on: self.created_on,
            updated_on: self.created_on,
        }
    }
}

/// Field values for rebuilding a stored issue, e.g. from a database row.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueDraft {
    pub id: IssueId,
    pub project: ProjectName,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// A stored issue.
///
/// ## Invariants
/// - `created_on <= updated_on`.
/// - `id`, `project`, and `created_on` never change after insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    id: IssueId,
    project: ProjectName,
    issue_title: String,
    issue_text: String,
    created_by: String,
    assigned_to: String,
    status_text: String,
    open: bool,
    created_on: DateTime<Utc>,
    updated_on: DateTime<Utc>,
}

impl Issue {
    /// Smallest change to `updated_on` a patch makes. Matches the precision
    /// timestamps are stored and reported at.
    pub const UPDATE_STEP: Duration = Duration::microseconds(1);

    /// Rebuild a stored issue, checking timestamp ordering.
    pub fn new(draft: IssueDraft) -> Result<Self, IssueValidationError> {
        if draft.updated_on < draft.created_on {
            return Err(IssueValidationError::UpdatedBeforeCreated);
        }
        Ok(Self {
            id: draft.id,
            project: draft.project,
            issue_title: draft.issue_title,
            issue_text: draft.issue_text,
            created_by: draft.created_by,
            assigned_to: draft.assigned_to,
            status_text: draft.status_text,
            open: draft.open,
            created_on: draft.created_on,
            updated_on: draft.updated_on,
        })
    }

    pub fn id(&self) -> IssueId {
        self.id
    }

    pub fn project(&self) -> &ProjectName {
        &self.project
    }

    pub fn issue_title(&self) -> &str {
        &self.issue_title
    }

    pub fn issue_text(&self) -> &str {
        &self.issue_text
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn assigned_to(&self) -> &str {
        &self.assigned_to
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn open(&self) -> bool {
        self.open
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    pub fn updated_on(&self) -> DateTime<Utc> {
        self.updated_on
    }

    /// Apply a sparse patch in place.
    ///
    /// `updated_on` advances by at least [`Issue::UPDATE_STEP`] on every
    /// patch, even when the patch carries the same or an earlier instant.
    pub fn apply(&mut self, patch: &IssuePatch) {
        if let Some(value) = patch.issue_title() {
            value.clone_into(&mut self.issue_title);
        }
        if let Some(value) = patch.issue_text() {
            value.clone_into(&mut self.issue_text);
        }
        if let Some(value) = patch.created_by() {
            value.clone_into(&mut self.created_by);
        }
        if let Some(value) = patch.assigned_to() {
            value.clone_into(&mut self.assigned_to);
        }
        if let Some(value) = patch.status_text() {
            value.clone_into(&mut self.status_text);
        }
        if let Some(open) = patch.open() {
            self.open = open;
        }
        let floor = self.updated_on.max(self.created_on) + Self::UPDATE_STEP;
        self.updated_on = patch.updated_on().max(floor);
    }
}
