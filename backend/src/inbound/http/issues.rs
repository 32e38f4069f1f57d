//! Issue resource handlers.
//!
//! ```text
//! GET    /api/issues/{project}
//! POST   /api/issues/{project}
//! PUT    /api/issues/{project}
//! DELETE /api/issues/{project}
//! ```
//!
//! Contract failures (`missing _id`, `could not update`, ...) are answered
//! with status 200 and an `error` key. Only store outages and internal
//! faults use the error envelope and a non-200 status.
//!
//! Bodies may be JSON or URL-encoded forms. A body that is absent or fails
//! to decode counts as empty.

use actix_web::{Either, HttpResponse, delete, get, post, put, web};

use crate::domain::ports::{
    CreateIssueRequest, DeleteIssueRequest, ListIssuesRequest, UpdateIssueRequest,
};
use crate::domain::{Error, IssueError, IssueFields, ProjectName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::issues_dto::{IssueBody, IssueErrorBody, IssueResponse, IssueResultBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// JSON or form body; `None` when neither decodes.
pub type IssuePayload = Option<Either<web::Json<IssueBody>, web::Form<IssueBody>>>;

fn payload_body(payload: IssuePayload) -> IssueBody {
    match payload {
        Some(Either::Left(json)) => json.into_inner(),
        Some(Either::Right(form)) => form.into_inner(),
        None => IssueBody::default(),
    }
}

fn project_name(raw: String) -> Result<ProjectName, Error> {
    ProjectName::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Map query pairs onto the filterable fields; the last duplicate wins.
fn filter_params(pairs: Vec<(String, String)>) -> (Option<String>, IssueFields) {
    let mut id = None;
    let mut fields = IssueFields::default();
    for (key, value) in pairs {
        let slot = match key.as_str() {
            "_id" => &mut id,
            "issue_title" => &mut fields.issue_title,
            "issue_text" => &mut fields.issue_text,
            "created_by" => &mut fields.created_by,
            "assigned_to" => &mut fields.assigned_to,
            "status_text" => &mut fields.status_text,
            "open" => &mut fields.open,
            _ => continue,
        };
        *slot = Some(value);
    }
    (id, fields)
}

fn contract_failure(error: IssueError) -> ApiResult<HttpResponse> {
    match error {
        IssueError::Service(inner) => Err(inner),
        other => Ok(HttpResponse::Ok().json(IssueErrorBody::from(&other))),
    }
}

/// List a project's issues, filtered by equality on any supplied field.
#[utoipa::path(
    get,
    path = "/api/issues/{project}",
    params(
        ("project" = String, Path, description = "Project the issues belong to"),
        ("_id" = Option<String>, Query, description = "Exact issue id"),
        ("issue_title" = Option<String>, Query),
        ("issue_text" = Option<String>, Query),
        ("created_by" = Option<String>, Query),
        ("assigned_to" = Option<String>, Query),
        ("status_text" = Option<String>, Query),
        ("open" = Option<bool>, Query)
    ),
    responses(
        (status = 200, description = "Matching issues, possibly none", body = Vec<IssueResponse>),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Issue store unavailable", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "listIssues"
)]
#[get("/api/issues/{project}")]
pub async fn list_issues(
    state: web::Data<HttpState>,
    project: web::Path<String>,
    query: web::Query<Vec<(String, String)>>,
) -> ApiResult<HttpResponse> {
    let project = project_name(project.into_inner())?;
    let (id, fields) = filter_params(query.into_inner());

    match state
        .issues_query
        .list_issues(ListIssuesRequest {
            project,
            id,
            fields,
        })
        .await
    {
        Ok(issues) => Ok(HttpResponse::Ok().json(
            issues
                .iter()
                .map(IssueResponse::from)
                .collect::<Vec<_>>(),
        )),
        Err(error) => contract_failure(error),
    }
}

/// Create an issue in a project.
#[utoipa::path(
    post,
    path = "/api/issues/{project}",
    params(("project" = String, Path, description = "Project the issue belongs to")),
    request_body(content = IssueBody, description = "JSON or URL-encoded form"),
    responses(
        (
            status = 200,
            description = "Created issue, or `{error: \"required field(s) missing\"}`",
            body = IssueResponse
        ),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Issue store unavailable", body = ErrorSchema)
    ),
    tags = ["issues"],
    operation_id = "createIssue"
)]
#[post("/api/issues/{project}")]
pub async fn create_issue(
    state: web::Data<HttpState>,
    project: web::Path<String>,
    payload: IssuePayload,
) -> ApiResult<HttpResponse> {
    let project = project_name(project.into_inner())?;
    let (_, fields) = payload_body(payload).into_parts();

    match state
        .issues
        .create_issue(CreateIssueRequest { project, fields })
        .await
    {
        Ok(issue) => Ok(HttpResponse::Ok().json(IssueResponse::from(&issue))),
        Err(error) => contract_failure(error),
    }
}

/// Patch the fields supplied in the body of the issue with `_id`.
#[utoipa::path(
    put,
    path = "/api/issues/{project}",
    params(("project" = String, Path, description = "Ignored; issues are addressed by `_id`")),
    request_body(content = IssueBody, description = "JSON or URL-encoded form"),
    responses(
        (
            status = 200,
            description = "`successfully updated`, or an `IssueErrorBody` such as `could not update`",
            body = IssueResultBody
        )
    ),
    tags = ["issues"],
    operation_id = "updateIssue"
)]
#[put("/api/issues/{project}")]
pub async fn update_issue(
    state: web::Data<HttpState>,
    payload: IssuePayload,
) -> ApiResult<HttpResponse> {
    let (id, fields) = payload_body(payload).into_parts();

    match state
        .issues
        .update_issue(UpdateIssueRequest { id, fields })
        .await
    {
        Ok(updated) => Ok(HttpResponse::Ok().json(IssueResultBody::updated(updated.id))),
        Err(error) => contract_failure(error),
    }
}

/// Delete the issue with `_id`.
#[utoipa::path(
    delete,
    path = "/api/issues/{project}",
    params(("project" = String, Path, description = "Ignored; issues are addressed by `_id`")),
    request_body(content = IssueBody, description = "Only `_id` is read"),
    responses(
        (
            status = 200,
            description = "`successfully deleted`, or an `IssueErrorBody` such as `could not delete`",
            body = IssueResultBody
        )
    ),
    tags = ["issues"],
    operation_id = "deleteIssue"
)]
#[delete("/api/issues/{project}")]
pub async fn delete_issue(
    state: web::Data<HttpState>,
    payload: IssuePayload,
) -> ApiResult<HttpResponse> {
    let (id, _) = payload_body(payload).into_parts();

    match state.issues.delete_issue(DeleteIssueRequest { id }).await {
        Ok(deleted) => Ok(HttpResponse::Ok().json(IssueResultBody::deleted(deleted.id))),
        Err(error) => contract_failure(error),
    }
}

/// Register every issue route on an Actix service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_issues)
        .service(create_issue)
        .service(update_issue)
        .service(delete_issue);
}

#[cfg(test)]
#[path = "issues_tests.rs"]
mod tests;
