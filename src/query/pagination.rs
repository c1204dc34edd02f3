use super::error::QueryError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 100;

/// Page/limit pair for list queries. Built once per request from the query
/// string and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
    limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT }
    }
}

impl Pagination {
    /// Build from optional query parameters, falling back to defaults
    /// field-by-field when the caller omits one.
    pub fn from_parts(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Both fields must be strictly positive. Callers surface this as a
    /// client-facing bad request before any SQL is built.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page < 1 {
            return Err(QueryError::InvalidPage(self.page));
        }
        if self.limit < 1 {
            return Err(QueryError::InvalidLimit(self.limit));
        }
        Ok(())
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Zero-based row offset: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_100() {
        let p = Pagination::default();
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 100);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn partial_input_overrides_field_by_field() {
        let p = Pagination::from_parts(Some(3), None);
        assert_eq!(p.page(), 3);
        assert_eq!(p.limit(), 100);

        let p = Pagination::from_parts(None, Some(25));
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 25);
    }

    #[test]
    fn offset_arithmetic() {
        assert_eq!(Pagination::from_parts(Some(2), Some(5)).offset(), 5);
        assert_eq!(Pagination::from_parts(Some(1), Some(100)).offset(), 0);
        assert_eq!(Pagination::from_parts(Some(4), Some(10)).offset(), 30);
    }

    #[test]
    fn validate_rejects_non_positive_fields() {
        assert!(Pagination::from_parts(Some(0), Some(10)).validate().is_err());
        assert!(Pagination::from_parts(Some(1), Some(-1)).validate().is_err());
        assert!(Pagination::from_parts(Some(0), Some(-1)).validate().is_err());
        assert!(Pagination::from_parts(Some(2), Some(5)).validate().is_ok());
    }
}
