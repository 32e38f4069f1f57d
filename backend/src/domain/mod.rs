//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the issue entity, the request rules that govern it, and
//! the ports adapters plug into. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload for conditions outside the issue
//!   contract (store outages, internal faults).
//! - Issue / NewIssue / IssueId / ProjectName: the persisted record and its
//!   identifiers.
//! - IssueFields / IssuePatch / IssueFilter: raw request input and the
//!   sparse update and equality filter derived from it.
//! - IssueError: contract-level outcomes such as `missing _id`.
//! - IssueService: implementation of the driving ports.

pub mod error;
pub mod issue;
pub mod issue_error;
pub mod issue_fields;
pub mod issue_filter;
pub mod issue_patch;
pub mod issue_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::issue::{
    Issue, IssueDraft, IssueId, IssueValidationError, NewIssue, NewIssueDraft, ProjectName,
};
pub use self::issue_error::IssueError;
pub use self::issue_fields::{IssueFields, OpenValue};
pub use self::issue_filter::{FilterOutcome, IssueFilter};
pub use self::issue_patch::IssuePatch;
pub use self::issue_service::IssueService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
