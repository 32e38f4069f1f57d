//! Equality filters for listing issues.
//!
//! A filter is always scoped to one project. Every other criterion is an
//! optional exact match built from allow-listed request parameters; empty
//! parameters impose no constraint.

use crate::domain::issue::non_empty;
use crate::domain::{Issue, IssueFields, IssueId, OpenValue, ProjectName};

/// Validated list filter handed to the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueFilter {
    project: ProjectName,
    id: Option<IssueId>,
    issue_title: Option<String>,
    issue_text: Option<String>,
    created_by: Option<String>,
    assigned_to: Option<String>,
    status_text: Option<String>,
    open: Option<bool>,
}

/// Result of turning request parameters into a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The parameters describe a filter the store can run.
    Filter(IssueFilter),
    /// A parameter can never equal a stored value (a malformed `_id`, or an
    /// `open` that is not a boolean), so the result is empty without asking
    /// the store.
    MatchesNothing,
}

impl IssueFilter {
    /// Filter selecting every issue of `project`.
    pub fn for_project(project: ProjectName) -> Self {
        Self {
            project,
            id: None,
            issue_title: None,
            issue_text: None,
            created_by: None,
            assigned_to: None,
            status_text: None,
            open: None,
        }
    }

    /// Build a filter from raw request parameters.
    ///
    /// `project` always comes from the route, so a same-named query
    /// parameter can never widen the scope.
    ///
    /// # Examples
    /// ```
    /// use issue_tracker::domain::{FilterOutcome, IssueFields, IssueFilter, ProjectName};
    ///
    /// let project = ProjectName::new("apitest").expect("project");
    /// let fields = IssueFields { issue_title: Some("title".into()), ..IssueFields::default() };
    /// let FilterOutcome::Filter(filter) = IssueFilter::from_params(project, None, fields) else {
    ///     panic!("expected a runnable filter");
    /// };
    /// assert_eq!(filter.issue_title(), Some("title"));
    ///
    /// let project = ProjectName::new("apitest").expect("project");
    /// let outcome = IssueFilter::from_params(project, Some("fail".into()), IssueFields::default());
    /// assert_eq!(outcome, FilterOutcome::MatchesNothing);
    /// ```
    pub fn from_params(
        project: ProjectName,
        id: Option<String>,
        fields: IssueFields,
    ) -> FilterOutcome {
        let id = match non_empty(id).map(|raw| raw.parse::<IssueId>()) {
            None => None,
            Some(Ok(id)) => Some(id),
            Some(Err(_)) => return FilterOutcome::MatchesNothing,
        };
        let open = match fields.open_value() {
            OpenValue::Absent => None,
            OpenValue::Flag(value) => Some(value),
            OpenValue::Unrecognised => return FilterOutcome::MatchesNothing,
        };

        FilterOutcome::Filter(Self {
            project,
            id,
            issue_title: non_empty(fields.issue_title),
            issue_text: non_empty(fields.issue_text),
            created_by: non_empty(fields.created_by),
            assigned_to: non_empty(fields.assigned_to),
            status_text: non_empty(fields.status_text),
            open,
        })
    }

    pub fn project(&self) -> &ProjectName {
        &self.project
    }

    pub fn id(&self) -> Option<IssueId> {
        self.id
    }

    pub fn issue_title(&self) -> Option<&str> {
        self.issue_title.as_deref()
    }

    pub fn issue_text(&self) -> Option<&str> {
        self.issue_text.as_deref()
    }

    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    pub fn assigned_to(&self) -> Option<&str> {
        self.assigned_to.as_deref()
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    pub fn open(&self) -> Option<bool> {
        self.open
    }

    /// Evaluate the filter against one issue.
    ///
    /// Stores that cannot push the filter down use this directly; SQL
    /// adapters translate the same criteria into `WHERE` clauses.
    pub fn matches(&self, issue: &Issue) -> bool {
        fn text_matches(expected: Option<&str>, actual: &str) -> bool {
            expected.is_none_or(|value| value == actual)
        }

        issue.project() == &self.project
            && self.id.is_none_or(|id| id == issue.id())
            && text_matches(self.issue_title(), issue.issue_title())
            && text_matches(self.issue_text(), issue.issue_text())
            && text_matches(self.created_by(), issue.created_by())
            && text_matches(self.assigned_to(), issue.assigned_to())
            && text_matches(self.status_text(), issue.status_text())
            && self.open.is_none_or(|open| open == issue.open())
    }
}
