//! Shared Diesel error mapping for the repositories in this module.
//!
//! Repositories hand in their own error constructors so the mapping stays
//! generic: pool failures become connection errors, closed connections
//! become connection errors, everything else becomes a query/write error.
//! Unique violations get their own hook so toggle repositories can turn
//! the storage constraint into their `Duplicate` variant.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
pub(crate) fn map_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    log_diesel_error(&error);

    match error {
        DieselError::NotFound => query("record not found".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => query(info.message().to_owned()),
        other => query(other.to_string()),
    }
}

/// Like [`map_diesel_error`], with a dedicated constructor for unique
/// violations. Used by the toggle repositories, where the storage-level
/// constraint is the authoritative duplicate check.
pub(crate) fn map_diesel_error_with_unique<E, Q, C, U>(
    error: diesel::result::Error,
    query: Q,
    connection: C,
    unique: U,
) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
    U: FnOnce(String) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        debug!(message = info.message(), "unique constraint rejected write");
        return unique(info.message().to_owned());
    }
    map_diesel_error(error, query, connection)
}

fn log_diesel_error(error: &diesel::result::Error) {
    use diesel::result::Error as DieselError;

    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(
            error_type = %std::any::type_name_of_val(other),
            "diesel operation failed"
        ),
    }
}
