//! Diesel row structs for the `issues` table. Never exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::issues;

/// Row read back from `issues`. `seq` is only used for ordering.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = issues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IssueRow {
    pub id: Uuid,
    pub project: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// Insertable issue; `id` and `seq` come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = issues)]
pub(crate) struct NewIssueRow<'a> {
    pub project: &'a str,
    pub issue_title: &'a str,
    pub issue_text: &'a str,
    pub created_by: &'a str,
    pub assigned_to: &'a str,
    pub status_text: &'a str,
    pub open: bool,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// Sparse update. `None` columns are left untouched; `updated_on` is set
/// alongside it by the repository.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = issues)]
pub(crate) struct IssueChangeset<'a> {
    pub issue_title: Option<&'a str>,
    pub issue_text: Option<&'a str>,
    pub created_by: Option<&'a str>,
    pub assigned_to: Option<&'a str>,
    pub status_text: Option<&'a str>,
    pub open: Option<bool>,
}
