//! Translation of pool and Diesel failures into issue repository errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::IssueRepositoryError;

use super::pool::PoolError;

/// Every pool failure means the store is unreachable.
pub(crate) fn map_pool_error(error: PoolError) -> IssueRepositoryError {
    IssueRepositoryError::connection(error.message())
}

/// Map a Diesel failure, keeping driver detail out of the message.
pub(crate) fn map_diesel_error(error: DieselError) -> IssueRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            IssueRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => IssueRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => IssueRepositoryError::query("database query error"),
        _ => IssueRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, IssueRepositoryError::connection("timed out"));
    }

    #[rstest]
    #[case(DieselError::NotFound, IssueRepositoryError::query("record not found"))]
    #[case(
        DieselError::BrokenTransactionManager,
        IssueRepositoryError::connection("database connection error")
    )]
    #[case(DieselError::RollbackTransaction, IssueRepositoryError::query("database error"))]
    fn diesel_errors_are_classified(
        #[case] error: DieselError,
        #[case] expected: IssueRepositoryError,
    ) {
        assert_eq!(map_diesel_error(error), expected);
    }
}
