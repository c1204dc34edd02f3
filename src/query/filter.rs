use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The closed set of value types that list filters can bind.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Uuid(Uuid),
    Text(String),
    Int(i32),
    BigInt(i64),
    Timestamp(DateTime<Utc>),
    UuidArray(Vec<Uuid>),
}

impl SqlValue {
    /// The load-bearing convention every call site follows: a zero/empty
    /// value is "absent" and contributes nothing to the query.
    pub fn is_absent(&self) -> bool {
        match self {
            SqlValue::Uuid(u) => u.is_nil(),
            SqlValue::Text(s) => s.is_empty(),
            SqlValue::UuidArray(a) => a.is_empty(),
            _ => false,
        }
    }
}

impl From<Uuid> for SqlValue {
    fn from(v: Uuid) -> Self {
        SqlValue::Uuid(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::BigInt(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(v)
    }
}

impl From<Vec<Uuid>> for SqlValue {
    fn from(v: Vec<Uuid>) -> Self {
        SqlValue::UuidArray(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparison {
    Equals,
    AtLeast,
    AtMost,
    Contains,
    AnyOf,
}

#[derive(Debug, Clone)]
pub(crate) struct Predicate {
    pub target: &'static str,
    pub comparison: Comparison,
    pub value: SqlValue,
}

/// Ordered collection of present predicates. Each per-entity filter struct
/// converts itself into one of these in fixed field-declaration order, so the
/// generated clause order never depends on how a caller assembled its input.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `column = $n`
    pub fn equals<V: Into<SqlValue>>(&mut self, column: &'static str, value: Option<V>) -> &mut Self {
        self.push(column, Comparison::Equals, value)
    }

    /// `column >= $n` (range-from)
    pub fn at_least<V: Into<SqlValue>>(&mut self, column: &'static str, value: Option<V>) -> &mut Self {
        self.push(column, Comparison::AtLeast, value)
    }

    /// `column <= $n` (range-to)
    pub fn at_most<V: Into<SqlValue>>(&mut self, column: &'static str, value: Option<V>) -> &mut Self {
        self.push(column, Comparison::AtMost, value)
    }

    /// `column ILIKE $n`; the value is wrapped in `%...%` when the SQL is
    /// built, not at the call site.
    pub fn contains(&mut self, column: &'static str, value: Option<String>) -> &mut Self {
        self.push(column, Comparison::Contains, value)
    }

    /// `column = ANY($n)` with a single array-typed parameter, so membership
    /// filters consume exactly one placeholder regardless of set size.
    pub fn any_of(&mut self, column: &'static str, values: Vec<Uuid>) -> &mut Self {
        self.push(column, Comparison::AnyOf, Some(values))
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub(crate) fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    fn push<V: Into<SqlValue>>(
        &mut self,
        target: &'static str,
        comparison: Comparison,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            let value = value.into();
            if !value.is_absent() {
                self.predicates.push(Predicate { target, comparison, value });
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_are_skipped() {
        let mut f = FilterSet::new();
        f.equals("theme_id", None::<Uuid>);
        f.equals("theme_id", Some(Uuid::nil()));
        f.contains("title", Some(String::new()));
        f.any_of("student_id", vec![]);
        assert!(f.is_empty());
    }

    #[test]
    fn present_values_are_kept_in_call_order() {
        let id = Uuid::new_v4();
        let mut f = FilterSet::new();
        f.equals("theme_id", Some(id));
        f.contains("title", Some("phonics".to_string()));
        assert_eq!(f.len(), 2);
        assert_eq!(f.predicates()[0].target, "theme_id");
        assert_eq!(f.predicates()[1].target, "title");
    }

    #[test]
    fn zero_integers_are_not_absent() {
        let mut f = FilterSet::new();
        f.equals("grade_level", Some(0i32));
        assert_eq!(f.len(), 1);
    }
}
