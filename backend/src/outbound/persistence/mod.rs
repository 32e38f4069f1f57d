//! Issue store adapters.
//!
//! `DieselIssueRepository` talks to PostgreSQL through `diesel-async` and a
//! `bb8` pool. `InMemoryIssueRepository` keeps issues in process memory and
//! is selected when no database URL is configured.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module; adapters hand only domain types across the port.
//!
//! # Example
//!
//! ```ignore
//! use issue_tracker::outbound::persistence::{DbPool, DieselIssueRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/issues")).await?;
//! let repo = DieselIssueRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_issue_repository;
mod in_memory_issue_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_issue_repository::DieselIssueRepository;
pub use in_memory_issue_repository::InMemoryIssueRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
