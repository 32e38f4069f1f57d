//! PostgreSQL-backed `IssueRepository` using Diesel.
//!
//! Filters become a dynamic `WHERE` clause on a boxed query. Insert, update,
//! and delete all use `RETURNING` so the stored row comes back in the same
//! round trip.
//!
//! Updates compute `updated_on` in SQL as
//! `GREATEST(updated_on + 1 microsecond, $now)`, so a patch always advances
//! the stored value even when the clock has not moved.

use async_trait::async_trait;
use diesel::dsl::IntervalDsl;
use diesel::prelude::*;
use diesel::sql_types::Timestamptz;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IssueRepository, IssueRepositoryError};
use crate::domain::{
    Issue, IssueDraft, IssueFilter, IssueId, IssuePatch, NewIssue, ProjectName,
};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{IssueChangeset, IssueRow, NewIssueRow};
use super::pool::DbPool;
use super::schema::issues;

define_sql_function! {
    /// PostgreSQL `GREATEST` over two timestamps.
    fn greatest(a: Timestamptz, b: Timestamptz) -> Timestamptz;
}

/// Diesel implementation of the issue record store.
#[derive(Clone)]
pub struct DieselIssueRepository {
    pool: DbPool,
}

impl DieselIssueRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_issue(row: IssueRow) -> Result<Issue, IssueRepositoryError> {
    let IssueRow {
        id,
        project,
        issue_title,
        issue_text,
        created_by,
        assigned_to,
        status_text,
        open,
        created_on,
        updated_on,
    } = row;

    let project =
        ProjectName::new(project).map_err(|err| IssueRepositoryError::query(err.to_string()))?;
    // Rows written with a lagging clock are clamped rather than rejected.
    let updated_on = updated_on.max(created_on);

    Issue::new(IssueDraft {
        id: IssueId::from_uuid(id),
        project,
        issue_title,
        issue_text,
        created_by,
        assigned_to,
        status_text,
        open,
        created_on,
        updated_on,
    })
    .map_err(|err| IssueRepositoryError::query(err.to_string()))
}

fn rows_to_issues(rows: Vec<IssueRow>) -> Result<Vec<Issue>, IssueRepositoryError> {
    rows.into_iter().map(row_to_issue).collect()
}

#[async_trait]
impl IssueRepository for DieselIssueRepository {
    async fn find(&self, filter: &IssueFilter) -> Result<Vec<Issue>, IssueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = issues::table
            .select(IssueRow::as_select())
            .filter(issues::project.eq(filter.project().as_str()))
            .order(issues::seq.asc())
            .into_boxed();

        if let Some(id) = filter.id() {
            query = query.filter(issues::id.eq(*id.as_uuid()));
        }
        if let Some(title) = filter.issue_title() {
            query = query.filter(issues::issue_title.eq(title));
        }
        if let Some(text) = filter.issue_text() {
            query = query.filter(issues::issue_text.eq(text));
        }
        if let Some(author) = filter.created_by() {
            query = query.filter(issues::created_by.eq(author));
        }
        if let Some(assignee) = filter.assigned_to() {
            query = query.filter(issues::assigned_to.eq(assignee));
        }
        if let Some(status) = filter.status_text() {
            query = query.filter(issues::status_text.eq(status));
        }
        if let Some(open) = filter.open() {
            query = query.filter(issues::open.eq(open));
        }

        let rows: Vec<IssueRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows_to_issues(rows)
    }

    async fn insert(&self, issue: &NewIssue) -> Result<Issue, IssueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewIssueRow {
            project: issue.project().as_str(),
            issue_title: issue.issue_title(),
            issue_text: issue.issue_text(),
            created_by: issue.created_by(),
            assigned_to: issue.assigned_to(),
            status_text: issue.status_text(),
            open: issue.open(),
            created_on: issue.created_on(),
            updated_on: issue.created_on(),
        };

        let row: IssueRow = diesel::insert_into(issues::table)
            .values(&new_row)
            .returning(IssueRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_issue(row)
    }

    async fn patch(
        &self,
        id: &IssueId,
        patch: &IssuePatch,
    ) -> Result<Option<Issue>, IssueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = IssueChangeset {
            issue_title: patch.issue_title(),
            issue_text: patch.issue_text(),
            created_by: patch.created_by(),
            assigned_to: patch.assigned_to(),
            status_text: patch.status_text(),
            open: patch.open(),
        };
        let updated_on = greatest(issues::updated_on + 1_i32.microseconds(), patch.updated_on());

        let row: Option<IssueRow> = diesel::update(issues::table.find(*id.as_uuid()))
            .set((&changeset, issues::updated_on.eq(updated_on)))
            .returning(IssueRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_issue).transpose()
    }

    async fn remove(&self, id: &IssueId) -> Result<Option<Issue>, IssueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<IssueRow> = diesel::delete(issues::table.find(*id.as_uuid()))
            .returning(IssueRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_issue).transpose()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    fn sample_row() -> IssueRow {
        let created_on = Utc
            .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        IssueRow {
            id: Uuid::new_v4(),
            project: "apitest".into(),
            issue_title: "Title".into(),
            issue_text: "Text".into(),
            created_by: "fCC".into(),
            assigned_to: String::new(),
            status_text: String::new(),
            open: true,
            created_on,
            updated_on: created_on,
        }
    }

    #[rstest]
    fn row_converts_to_issue() {
        let row = sample_row();
        let id = row.id;

        let issue = row_to_issue(row).expect("row converts");

        assert_eq!(*issue.id().as_uuid(), id);
        assert_eq!(issue.project().as_str(), "apitest");
        assert!(issue.open());
    }

    #[rstest]
    fn row_with_empty_project_is_a_query_error() {
        let row = IssueRow {
            project: String::new(),
            ..sample_row()
        };

        let err = row_to_issue(row).expect_err("empty project rejected");
        assert!(matches!(err, IssueRepositoryError::Query { .. }));
    }

    #[rstest]
    fn lagging_updated_on_is_clamped_to_created_on() {
        let base = sample_row();
        let row = IssueRow {
            updated_on: base.created_on - Duration::seconds(5),
            ..base.clone()
        };

        let issue = row_to_issue(row).expect("row converts");
        assert_eq!(issue.updated_on(), base.created_on);
    }
}
