pub mod auth;
pub mod files;
pub mod game_results;
pub mod resources;
pub mod session_resources;
pub mod sessions;
pub mod students;
pub mod themes;
pub mod therapists;

use crate::config;
use crate::error::ApiError;
use crate::query::Pagination;

/// Shared query-string handling for every list endpoint: apply defaults,
/// reject non-positive values, enforce the configured cap when one is set.
pub(crate) fn parse_pagination(
    page: Option<i64>,
    limit: Option<i64>,
) -> Result<Pagination, ApiError> {
    let pagination = Pagination::from_parts(page, limit);
    pagination.validate()?;
    if let Some(max) = config::config().pagination.max_limit {
        if pagination.limit() > max {
            return Err(ApiError::bad_request(format!("limit exceeds server maximum of {max}")));
        }
    }
    Ok(pagination)
}
