use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid page: {0} (must be >= 1)")]
    InvalidPage(i64),

    #[error("Invalid limit: {0} (must be >= 1)")]
    InvalidLimit(i64),
}
