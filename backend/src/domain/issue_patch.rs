//! Sparse issue updates.

use chrono::{DateTime, Utc};

use crate::domain::issue::non_empty;
use crate::domain::{IssueFields, OpenValue};

/// The fields an update will overwrite, plus the new `updated_on`.
///
/// Only fields the client actually sent with a non-empty value are carried;
/// everything else on the stored record is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuePatch {
    issue_title: Option<String>,
    issue_text: Option<String>,
    created_by: Option<String>,
    assigned_to: Option<String>,
    status_text: Option<String>,
    open: Option<bool>,
    updated_on: DateTime<Utc>,
}

impl IssuePatch {
    /// Build a patch from the raw submitted fields.
    ///
    /// Returns `None` when the submission carries no update field at all. The
    /// check runs on the raw values, so an absent `open` never makes an
    /// otherwise empty submission look like an update.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use issue_tracker::domain::{IssueFields, IssuePatch};
    ///
    /// assert!(IssuePatch::from_fields(IssueFields::default(), Utc::now()).is_none());
    ///
    /// let fields = IssueFields { open: Some("false".into()), ..IssueFields::default() };
    /// let patch = IssuePatch::from_fields(fields, Utc::now()).expect("open counts");
    /// assert_eq!(patch.open(), Some(false));
    /// ```
    pub fn from_fields(fields: IssueFields, updated_on: DateTime<Utc>) -> Option<Self> {
        let open = match fields.open_value() {
            OpenValue::Flag(value) => Some(value),
            OpenValue::Absent | OpenValue::Unrecognised => None,
        };
        let patch = Self {
            issue_title: non_empty(fields.issue_title),
            issue_text: non_empty(fields.issue_text),
            created_by: non_empty(fields.created_by),
            assigned_to: non_empty(fields.assigned_to),
            status_text: non_empty(fields.status_text),
            open,
            updated_on,
        };
        (!patch.is_empty()).then_some(patch)
    }

    fn is_empty(&self) -> bool {
        self.issue_title.is_none()
            && self.issue_text.is_none()
            && self.created_by.is_none()
            && self.assigned_to.is_none()
            && self.status_text.is_none()
            && self.open.is_none()
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

    /// Timestamp written to `updated_on` on every successful patch.
    pub fn updated_on(&self) -> DateTime<Utc> {
        self.updated_on
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[rstest]
    fn no_fields_means_no_patch() {
        assert!(IssuePatch::from_fields(IssueFields::default(), now()).is_none());
    }

    #[rstest]
    fn empty_strings_do_not_count_as_updates() {
        let fields = IssueFields {
            issue_title: Some(String::new()),
            assigned_to: Some(String::new()),
            open: Some(String::new()),
            ..IssueFields::default()
        };
        assert!(IssuePatch::from_fields(fields, now()).is_none());
    }

    #[rstest]
    fn unrecognised_open_is_not_an_update() {
        let fields = IssueFields {
            open: Some("sometimes".to_owned()),
            ..IssueFields::default()
        };
        assert!(IssuePatch::from_fields(fields, now()).is_none());
    }

    #[rstest]
    fn carries_only_present_fields() {
        let fields = IssueFields {
            issue_title: Some("new title".to_owned()),
            issue_text: Some(String::new()),
            ..IssueFields::default()
        };
        let patch = IssuePatch::from_fields(fields, now()).expect("title present");
        assert_eq!(patch.issue_title(), Some("new title"));
        assert!(patch.issue_text().is_none());
        assert!(patch.open().is_none());
        assert_eq!(patch.updated_on(), now());
    }

    #[rstest]
    #[case("true", true)]
    #[case("false", false)]
    fn open_alone_is_an_update(#[case] raw: &str, #[case] expected: bool) {
        let fields = IssueFields {
            open: Some(raw.to_owned()),
            ..IssueFields::default()
        };
        let patch = IssuePatch::from_fields(fields, now()).expect("open present");
        assert_eq!(patch.open(), Some(expected));
    }
}
