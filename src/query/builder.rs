use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, Postgres};

use super::filter::{Comparison, FilterSet, SqlValue};
use super::pagination::Pagination;

/// Compose a parameterized list query from a base `SELECT ... FROM ...
/// [JOIN ...]`, the present filters, a fixed `ORDER BY` expression, and a
/// validated `Pagination`.
///
/// The returned argument vector is index-aligned with the `$n` placeholders in
/// the SQL string: filter values first in declaration order, then limit, then
/// offset. Pure string/slice construction, cannot fail; invalid pagination is
/// rejected before this point.
pub fn build_select(
    base: &str,
    filters: &FilterSet,
    order_by: &str,
    pagination: &Pagination,
) -> (String, Vec<SqlValue>) {
    let mut sql = base.to_string();
    let mut args: Vec<SqlValue> = Vec::with_capacity(filters.len() + 2);

    if !filters.is_empty() {
        sql.push_str(" WHERE 1=1");
        for predicate in filters.predicates() {
            args.push(match predicate.comparison {
                Comparison::Contains => match &predicate.value {
                    SqlValue::Text(s) => SqlValue::Text(format!("%{}%", s)),
                    other => other.clone(),
                },
                _ => predicate.value.clone(),
            });
            let n = args.len();
            let clause = match predicate.comparison {
                Comparison::Equals => format!(" AND {} = ${}", predicate.target, n),
                Comparison::AtLeast => format!(" AND {} >= ${}", predicate.target, n),
                Comparison::AtMost => format!(" AND {} <= ${}", predicate.target, n),
                Comparison::Contains => format!(" AND {} ILIKE ${}", predicate.target, n),
                Comparison::AnyOf => format!(" AND {} = ANY(${})", predicate.target, n),
            };
            sql.push_str(&clause);
        }
    }

    sql.push_str(&format!(" ORDER BY {}", order_by));

    args.push(SqlValue::BigInt(pagination.limit()));
    args.push(SqlValue::BigInt(pagination.offset()));
    sql.push_str(&format!(" LIMIT ${} OFFSET ${}", args.len() - 1, args.len()));

    (sql, args)
}

/// Attach a builder argument vector to a typed query in index order.
pub fn bind_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    values: &'q [SqlValue],
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    for v in values {
        q = match v {
            SqlValue::Uuid(u) => q.bind(*u),
            SqlValue::Text(s) => q.bind(s),
            SqlValue::Int(i) => q.bind(*i),
            SqlValue::BigInt(i) => q.bind(*i),
            SqlValue::Timestamp(t) => q.bind(*t),
            SqlValue::UuidArray(a) => q.bind(a),
        };
    }
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const BASE: &str = "SELECT id, title FROM resources";

    #[test]
    fn empty_filters_skip_the_where_keyword() {
        let pagination = Pagination::default();
        let (sql, args) = build_select(BASE, &FilterSet::new(), "created_at DESC, id", &pagination);
        assert_eq!(
            sql,
            "SELECT id, title FROM resources ORDER BY created_at DESC, id LIMIT $1 OFFSET $2"
        );
        assert_eq!(args, vec![SqlValue::BigInt(100), SqlValue::BigInt(0)]);
    }

    #[test]
    fn single_filter_binds_before_limit_and_offset() {
        let theme_id = Uuid::new_v4();
        let mut filters = FilterSet::new();
        filters.equals("theme_id", Some(theme_id));
        let pagination = Pagination::from_parts(Some(1), Some(10));

        let (sql, args) = build_select(BASE, &filters, "created_at DESC, id", &pagination);
        assert_eq!(
            sql,
            "SELECT id, title FROM resources WHERE 1=1 AND theme_id = $1 \
             ORDER BY created_at DESC, id LIMIT $2 OFFSET $3"
        );
        assert_eq!(sql.matches(" AND ").count(), 1);
        assert_eq!(
            args,
            vec![SqlValue::Uuid(theme_id), SqlValue::BigInt(10), SqlValue::BigInt(0)]
        );
    }

    #[test]
    fn second_page_offsets_by_one_page() {
        let theme_id = Uuid::new_v4();
        let mut filters = FilterSet::new();
        filters.equals("theme_id", Some(theme_id));
        let pagination = Pagination::from_parts(Some(2), Some(10));

        let (_, args) = build_select(BASE, &filters, "created_at DESC, id", &pagination);
        assert_eq!(args[1], SqlValue::BigInt(10));
        assert_eq!(args[2], SqlValue::BigInt(10));
    }

    #[test]
    fn substring_filters_are_wrapped_server_side() {
        let mut filters = FilterSet::new();
        filters.contains("title", Some("vowel".to_string()));
        let (sql, args) = build_select(BASE, &filters, "id", &Pagination::default());
        assert!(sql.contains("title ILIKE $1"));
        assert_eq!(args[0], SqlValue::Text("%vowel%".to_string()));
    }

    #[test]
    fn membership_filters_use_one_array_parameter() {
        let ids = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let mut filters = FilterSet::new();
        filters.any_of("student_id", ids.clone());
        let (sql, args) = build_select(BASE, &filters, "id", &Pagination::default());
        assert!(sql.contains("student_id = ANY($1)"));
        assert!(sql.contains("LIMIT $2 OFFSET $3"));
        assert_eq!(args[0], SqlValue::UuidArray(ids));
    }

    #[test]
    fn parameter_counter_runs_across_all_clauses() {
        let mut filters = FilterSet::new();
        filters.equals("therapist_id", Some(Uuid::new_v4()));
        filters.at_least("scheduled_at", Some(chrono::Utc::now()));
        filters.contains("notes", Some("review".to_string()));
        let (sql, args) = build_select(BASE, &filters, "scheduled_at", &Pagination::default());
        assert!(sql.contains("therapist_id = $1"));
        assert!(sql.contains("scheduled_at >= $2"));
        assert!(sql.contains("notes ILIKE $3"));
        assert!(sql.contains("LIMIT $4 OFFSET $5"));
        assert_eq!(args.len(), 5);
    }

    #[test]
    fn identical_input_produces_identical_sql_and_args() {
        let theme_id = Uuid::new_v4();
        let build = || {
            let mut filters = FilterSet::new();
            filters.equals("theme_id", Some(theme_id));
            filters.contains("title", Some("blends".to_string()));
            build_select(BASE, &filters, "created_at DESC, id", &Pagination::from_parts(Some(3), Some(20)))
        };
        let (sql_a, args_a) = build();
        let (sql_b, args_b) = build();
        assert_eq!(sql_a, sql_b);
        assert_eq!(args_a, args_b);
    }
}
