//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL (Diesel) and in-memory issue stores.
//!
//! Adapters only translate between domain types and storage
//! representations; request rules stay in the domain service.

pub mod persistence;
