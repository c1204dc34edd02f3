// Pure contracts of the list-query machinery; no database required.

use practice_api::database::models::resource::{Resource, ResourceFilters, ResourceWithTheme};
use practice_api::database::models::student::Student;
use practice_api::query::{build_select, Pagination, SqlValue};
use uuid::Uuid;

#[test]
fn empty_collections_serialize_as_json_arrays() {
    // The HTTP contract is `[]`, never `null`, when a page has no rows.
    assert_eq!(serde_json::to_string(&Vec::<Student>::new()).unwrap(), "[]");
    assert_eq!(serde_json::to_string(&Vec::<Resource>::new()).unwrap(), "[]");
    assert_eq!(serde_json::to_string(&Vec::<ResourceWithTheme>::new()).unwrap(), "[]");
}

#[test]
fn resource_list_query_shape_is_stable() {
    let theme_id = Uuid::new_v4();
    let filters = ResourceFilters { theme_id: Some(theme_id), ..Default::default() };
    let pagination = Pagination::from_parts(Some(1), Some(10));

    let (sql, args) = build_select(
        "SELECT r.id FROM resources r LEFT JOIN themes t ON t.id = r.theme_id",
        &filters.to_filter_set(),
        "r.created_at DESC, r.id",
        &pagination,
    );

    assert_eq!(
        sql,
        "SELECT r.id FROM resources r LEFT JOIN themes t ON t.id = r.theme_id \
         WHERE 1=1 AND r.theme_id = $1 ORDER BY r.created_at DESC, r.id LIMIT $2 OFFSET $3"
    );
    assert_eq!(
        args,
        vec![SqlValue::Uuid(theme_id), SqlValue::BigInt(10), SqlValue::BigInt(0)]
    );
}

#[test]
fn repeated_builds_are_byte_identical() {
    let theme_id = Uuid::new_v4();
    let build = || {
        let filters = ResourceFilters {
            theme_id: Some(theme_id),
            grade_level: Some(3),
            title: Some("sight words".to_string()),
            ..Default::default()
        };
        build_select(
            "SELECT r.id FROM resources r",
            &filters.to_filter_set(),
            "r.created_at DESC, r.id",
            &Pagination::from_parts(Some(2), Some(25)),
        )
    };

    let (sql_a, args_a) = build();
    let (sql_b, args_b) = build();
    assert_eq!(sql_a, sql_b);
    assert_eq!(args_a, args_b);

    // Offset component for page 2 of 25
    assert_eq!(args_a.last(), Some(&SqlValue::BigInt(25)));
}

#[test]
fn pagination_validation_and_offsets() {
    assert!(Pagination::from_parts(Some(0), Some(-1)).validate().is_err());
    assert!(Pagination::from_parts(Some(2), Some(5)).validate().is_ok());
    assert_eq!(Pagination::from_parts(Some(2), Some(5)).offset(), 5);
    assert_eq!(Pagination::default().offset(), 0);
}
