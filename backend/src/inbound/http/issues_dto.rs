//! Wire payloads for the issue routes.
//!
//! Field names follow the public contract: snake_case text fields and an
//! `_id` key for identifiers. `project` is never serialised.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Issue, IssueError, IssueFields};

/// A body value as sent by clients.
///
/// Strings, numbers, and booleans are read as text so a stray `"open": 0`
/// or numeric `_id` does not spoil the rest of the body. Arrays and objects
/// count as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BodyValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Other(serde_json::Value),
}

impl BodyValue {
    /// Text form of a scalar; `None` for arrays and objects.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(number) => Some(number.to_string()),
            Self::Bool(flag) => Some(flag.to_string()),
            Self::Other(_) => None,
        }
    }
}

/// Body accepted by create, update, and delete.
///
/// Every key is optional at the wire level; which ones matter depends on
/// the operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default)]
pub struct IssueBody {
    #[serde(rename = "_id")]
    #[schema(value_type = Option<String>, example = "5f0c2b4e-8a7d-4f4e-9c1b-2d3e4f5a6b7c")]
    pub id: Option<BodyValue>,
    #[schema(value_type = Option<String>, example = "Faux Issue Title")]
    pub issue_title: Option<BodyValue>,
    #[schema(value_type = Option<String>)]
    pub issue_text: Option<BodyValue>,
    #[schema(value_type = Option<String>)]
    pub created_by: Option<BodyValue>,
    #[schema(value_type = Option<String>)]
    pub assigned_to: Option<BodyValue>,
    #[schema(value_type = Option<String>)]
    pub status_text: Option<BodyValue>,
    #[schema(value_type = Option<bool>)]
    pub open: Option<BodyValue>,
}

impl IssueBody {
    /// Split into the raw `_id` and the issue fields.
    pub fn into_parts(self) -> (Option<String>, IssueFields) {
        let Self {
            id,
            issue_title,
            issue_text,
            created_by,
            assigned_to,
            status_text,
            open,
        } = self;
        let text = |value: Option<BodyValue>| value.and_then(BodyValue::into_text);
        let fields = IssueFields {
            issue_title: text(issue_title),
            issue_text: text(issue_text),
            created_by: text(created_by),
            assigned_to: text(assigned_to),
            status_text: text(status_text),
            open: text(open),
        };
        (text(id), fields)
    }
}

/// Issue as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IssueResponse {
    #[serde(rename = "_id")]
    #[schema(format = "uuid")]
    pub id: String,
    pub issue_title: String,
    pub issue_text: String,
    pub created_by: String,
    pub assigned_to: String,
    pub status_text: String,
    pub open: bool,
    #[schema(format = "date-time")]
    pub created_on: String,
    #[schema(format = "date-time")]
    pub updated_on: String,
}

impl From<&Issue> for IssueResponse {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id().to_string(),
            issue_title: issue.issue_title().to_owned(),
            issue_text: issue.issue_text().to_owned(),
            created_by: issue.created_by().to_owned(),
            assigned_to: issue.assigned_to().to_owned(),
            status_text: issue.status_text().to_owned(),
            open: issue.open(),
            created_on: issue
                .created_on()
                .to_rfc3339_opts(SecondsFormat::Micros, true),
            updated_on: issue
                .updated_on()
                .to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

/// `{result, _id}` acknowledgement for update and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IssueResultBody {
    #[schema(example = "successfully updated")]
    pub result: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl IssueResultBody {
    pub fn updated(id: String) -> Self {
        Self {
            result: "successfully updated".to_owned(),
            id,
        }
    }

    pub fn deleted(id: String) -> Self {
        Self {
            result: "successfully deleted".to_owned(),
            id,
        }
    }
}

/// `{error, _id?}` body reported with status 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IssueErrorBody {
    #[schema(example = "missing _id")]
    pub error: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl From<&IssueError> for IssueErrorBody {
    fn from(error: &IssueError) -> Self {
        Self {
            error: error.to_string(),
            id: error.echoed_id().map(str::to_owned),
        }
    }
}
