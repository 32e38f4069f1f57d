//! OpenAPI schemas for domain types.
//!
//! Domain types do not derive `ToSchema`; these wrappers describe their wire
//! shape from the adapter layer instead.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The issue store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`], the envelope used for
/// non-200 responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "service_unavailable")]
    code: ErrorCodeSchema,
    #[schema(example = "Issue store unavailable")]
    message: String,
    /// Matches the `trace-id` response header.
    #[schema(example = "6f1c2a7e-0d53-4b8e-9a61-3c2d7b8f9e10")]
    trace_id: Option<String>,
}
