mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

// End-to-end pagination over the resources list. Requires DATABASE_URL to
// point at a reachable Postgres; each test isolates itself behind a freshly
// created theme so fixtures don't collide across runs.

#[tokio::test]
async fn filtered_list_paginates_fifteen_rows_as_ten_plus_five() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::mint_token();

    // Fixture: one theme, 15 resources under it
    let theme: serde_json::Value = client
        .post(format!("{}/api/themes", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": format!("pagination fixture {}", uuid::Uuid::new_v4()) }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let theme_id = theme["id"].as_str().expect("theme id").to_string();

    for i in 0..15 {
        let res = client
            .post(format!("{}/api/resources", server.base_url))
            .bearer_auth(&token)
            .json(&json!({
                "title": format!("fixture resource {i}"),
                "theme_id": theme_id,
            }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED, "resource {i} not created");
    }

    // Page 1: exactly 10 rows
    let page1: Vec<serde_json::Value> = client
        .get(format!(
            "{}/api/resources?theme_id={}&page=1&limit=10",
            server.base_url, theme_id
        ))
        .bearer_auth(&token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(page1.len(), 10);
    for row in &page1 {
        assert_eq!(row["theme"]["id"].as_str(), Some(theme_id.as_str()));
    }

    // Page 2: the remaining 5
    let page2: Vec<serde_json::Value> = client
        .get(format!(
            "{}/api/resources?theme_id={}&page=2&limit=10",
            server.base_url, theme_id
        ))
        .bearer_auth(&token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(page2.len(), 5);

    // No row appears on both pages
    let ids1: Vec<&str> = page1.iter().filter_map(|r| r["id"].as_str()).collect();
    for row in &page2 {
        assert!(!ids1.contains(&row["id"].as_str().unwrap()));
    }

    Ok(())
}

#[tokio::test]
async fn empty_page_returns_json_array_not_null() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::mint_token();

    // A theme nobody attached resources to
    let theme: serde_json::Value = client
        .post(format!("{}/api/themes", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": format!("empty fixture {}", uuid::Uuid::new_v4()) }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let theme_id = theme["id"].as_str().expect("theme id");

    let res = client
        .get(format!("{}/api/resources?theme_id={}", server.base_url, theme_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.text().await?;
    assert_eq!(body.trim(), "[]", "expected a JSON array, got: {body}");

    Ok(())
}

#[tokio::test]
async fn non_positive_pagination_is_rejected() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::mint_token();

    for query in ["page=0", "limit=0", "page=-1&limit=5"] {
        let res = client
            .get(format!("{}/api/students?{}", server.base_url, query))
            .bearer_auth(&token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "query {query} should be rejected");
    }

    Ok(())
}

#[tokio::test]
async fn missing_single_lookup_is_404() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::mint_token();

    let res = client
        .get(format!("{}/api/students/{}", server.base_url, uuid::Uuid::new_v4()))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn protected_routes_require_bearer_token() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/api/students", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
