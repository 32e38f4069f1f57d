//! HTTP inbound adapter exposing the issue routes and health probes.

pub mod error;
pub mod health;
pub mod issues;
pub mod issues_dto;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
