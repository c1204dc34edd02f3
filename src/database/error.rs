use thiserror::Error;

/// Typed store errors surfaced by the repository facades. Classification
/// happens once, here, from the driver's structured SQLSTATE codes - never by
/// substring-matching human-readable error text.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("invalid reference: {0}")]
    ForeignKey(String),

    #[error("already exists: {0}")]
    Unique(String),

    #[error("constraint violated: {0}")]
    Check(String),

    #[error("database unavailable: {0}")]
    Transport(String),

    #[error("database error: {0}")]
    Internal(sqlx::Error),
}

// SQLSTATE class 23 (integrity constraint violation)
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";

impl DataError {
    fn classify(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => {
                let constraint = || db.constraint().unwrap_or("unknown constraint").to_string();
                match db.code().as_deref() {
                    Some(FOREIGN_KEY_VIOLATION) => DataError::ForeignKey(constraint()),
                    Some(UNIQUE_VIOLATION) => DataError::Unique(constraint()),
                    Some(CHECK_VIOLATION) => DataError::Check(constraint()),
                    _ => DataError::Internal(err),
                }
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => DataError::Transport(err.to_string()),
            _ => DataError::Internal(err),
        }
    }
}

impl From<sqlx::Error> for DataError {
    fn from(err: sqlx::Error) -> Self {
        Self::classify(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_classify_as_transport() {
        let err = DataError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DataError::Transport(_)));
    }

    #[test]
    fn unclassified_errors_stay_internal() {
        // RowNotFound is handled at the facade via fetch_optional; if it leaks
        // this far it is a programmer error, not a 404.
        let err = DataError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DataError::Internal(_)));
    }
}
