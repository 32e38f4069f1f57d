//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`IssueCommand`, `IssueQuery`) are what inbound adapters
//! call. The driven port (`IssueRepository`) is what outbound adapters
//! implement.

mod macros;
pub(crate) use macros::define_port_error;

mod issue_command;
mod issue_query;
mod issue_repository;

#[cfg(test)]
pub use issue_command::MockIssueCommand;
pub use issue_command::{
    CreateIssueRequest, DeleteIssueRequest, DeleteIssueResponse, IssueCommand,
    UpdateIssueRequest, UpdateIssueResponse,
};
#[cfg(test)]
pub use issue_query::MockIssueQuery;
pub use issue_query::{IssueQuery, ListIssuesRequest};
#[cfg(test)]
pub use issue_repository::MockIssueRepository;
pub use issue_repository::{IssueRepository, IssueRepositoryError};
