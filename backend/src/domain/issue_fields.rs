//! Allow-listed issue fields as submitted by a client.
//!
//! Inbound adapters copy only these keys out of a request; anything else the
//! client sends never reaches the domain or the store.

use crate::domain::NewIssueDraft;

/// Raw issue field values taken from a request body or query string.
///
/// Values are kept exactly as submitted. An empty string counts as absent
/// wherever presence matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFields {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    /// `"true"` or `"false"`; adapters render JSON booleans to these.
    pub open: Option<String>,
}

/// Interpretation of a submitted `open` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenValue {
    /// Not submitted, or submitted empty.
    Absent,
    /// A recognised boolean.
    Flag(bool),
    /// Submitted but neither `true` nor `false`.
    Unrecognised,
}

impl IssueFields {
    /// Classify the submitted `open` value.
    ///
    /// # Examples
    /// ```
    /// use issue_tracker::domain::{IssueFields, OpenValue};
    ///
    /// let fields = IssueFields { open: Some("False".into()), ..IssueFields::default() };
    /// assert_eq!(fields.open_value(), OpenValue::Flag(false));
    /// ```
    pub fn open_value(&self) -> OpenValue {
        match self.open.as_deref().map(str::trim) {
            None | Some("") => OpenValue::Absent,
            Some(text) if text.eq_ignore_ascii_case("true") => OpenValue::Flag(true),
            Some(text) if text.eq_ignore_ascii_case("false") => OpenValue::Flag(false),
            Some(_) => OpenValue::Unrecognised,
        }
    }

    /// Split off the creation-relevant fields; `open` is ignored on create.
    pub fn into_new_issue_draft(self) -> NewIssueDraft {
        NewIssueDraft {
            issue_title: self.issue_title,
            issue_text: self.issue_text,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            status_text: self.status_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, OpenValue::Absent)]
    #[case(Some(""), OpenValue::Absent)]
    #[case(Some("true"), OpenValue::Flag(true))]
    #[case(Some(" TRUE "), OpenValue::Flag(true))]
    #[case(Some("false"), OpenValue::Flag(false))]
    #[case(Some("maybe"), OpenValue::Unrecognised)]
    fn classifies_open_values(#[case] raw: Option<&str>, #[case] expected: OpenValue) {
        let fields = IssueFields {
            open: raw.map(str::to_owned),
            ..IssueFields::default()
        };
        assert_eq!(fields.open_value(), expected);
    }

    #[rstest]
    fn draft_drops_open() {
        let fields = IssueFields {
            issue_title: Some("title".to_owned()),
            open: Some("false".to_owned()),
            ..IssueFields::default()
        };
        let draft = fields.into_new_issue_draft();
        assert_eq!(draft.issue_title.as_deref(), Some("title"));
        assert!(draft.issue_text.is_none());
    }
}
