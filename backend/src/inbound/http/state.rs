//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they can be exercised against mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{IssueCommand, IssueQuery};

/// Port implementations used by the issue handlers.
#[derive(Clone)]
pub struct HttpState {
    pub issues: Arc<dyn IssueCommand>,
    pub issues_query: Arc<dyn IssueQuery>,
}

impl HttpState {
    /// Bundle the command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use issue_tracker::domain::IssueService;
    /// use issue_tracker::inbound::http::state::HttpState;
    /// use issue_tracker::outbound::persistence::InMemoryIssueRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(IssueService::new(
    ///     Arc::new(InMemoryIssueRepository::new()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.issues_query.clone();
    /// ```
    pub fn new(issues: Arc<dyn IssueCommand>, issues_query: Arc<dyn IssueQuery>) -> Self {
        Self {
            issues,
            issues_query,
        }
    }
}
