//! HTTP mapping for the domain error envelope.
//!
//! Only failures outside the issue contract reach this path; contract
//! outcomes such as `missing _id` are rendered by the issue handlers with
//! status 200.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for handlers whose failures use the error envelope.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Store and internal failures keep their code and trace id but lose driver
/// detail.
fn client_view(error: &Error) -> Error {
    match error.code() {
        ErrorCode::InternalError => error.redacted("Internal server error"),
        ErrorCode::ServiceUnavailable => error.redacted("Issue store unavailable"),
        ErrorCode::InvalidRequest => error.clone(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(client_view(self))
    }
}
