//! OpenAPI document for the issue tracker.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::OpenApi;

use crate::inbound::http::issues_dto::{
    IssueBody, IssueErrorBody, IssueResponse, IssueResultBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Issue tracker API",
        description = "Project-scoped issue tracking. Contract failures are \
                       reported with status 200 and an `error` key."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::issues::list_issues,
        crate::inbound::http::issues::create_issue,
        crate::inbound::http::issues::update_issue,
        crate::inbound::http::issues::delete_issue,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        IssueBody,
        IssueResponse,
        IssueResultBody,
        IssueErrorBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "issues", description = "Issue resource operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
