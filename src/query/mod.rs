pub mod builder;
pub mod error;
pub mod filter;
pub mod pagination;

pub use builder::{bind_values, build_select};
pub use error::QueryError;
pub use filter::{FilterSet, SqlValue};
pub use pagination::Pagination;
