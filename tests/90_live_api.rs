//! End-to-end tests against a spawned server and a live Postgres.
//!
//! These exercise the storage-backed flows the router tests cannot: owner
//! scoping of listings, the transactional recommendation insert, and the
//! rule that a non-owner delete leaves storage untouched.
//!
//! Requires DATABASE_URL; each test skips cleanly when it is absent.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Acquire a token for `email` and return it formatted as a cookie header
/// value. The cookie is marked Secure, so over plain http the tests attach
/// it by hand instead of relying on a client cookie store.
async fn login(base_url: &str, email: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/jwt", base_url))
        .json(&json!({ "email": email }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let token = body["token"].as_str().expect("token in response");
    Ok(format!("userToken={}", token))
}

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    if !common::live_database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    Ok(())
}

#[tokio::test]
async fn protected_routes_reject_anonymous_requests() -> Result<()> {
    if !common::live_database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for path in ["/query/all", "/recommendation/all", "/recommendation/foruser"] {
        let res = client
            .get(format!("{}{}", server.base_url, path))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "path {}", path);
    }
    Ok(())
}

#[tokio::test]
async fn query_and_recommendation_flow_enforces_ownership() -> Result<()> {
    if !common::live_database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let asker = login(&server.base_url, "asker@example.com").await?;
    let recommender = login(&server.base_url, "recommender@example.com").await?;

    // Asker creates a query; the owner email comes from the token.
    let res = client
        .post(format!("{}/query/add", server.base_url))
        .header("cookie", &asker)
        .json(&json!({
            "productName": "SparkleCola",
            "title": "Looking for an alternative soda",
            "details": "Anything less sugary"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let query = res.json::<Value>().await?;
    let query_id = query["id"].as_str().expect("query id").to_string();
    assert_eq!(query["email"], "asker@example.com");
    assert_eq!(query["recommendationCount"], 0);

    // Public search finds it by a single word, case-insensitively.
    let res = client
        .get(format!("{}/query?productName=sparklecola", server.base_url))
        .send()
        .await?;
    let found = res.json::<Vec<Value>>().await?;
    assert!(found.iter().any(|q| q["id"] == query_id.as_str()));

    // Recommendation submission is public and bumps the count atomically.
    let res = client
        .post(format!("{}/recommendation/add", server.base_url))
        .json(&json!({
            "queryId": query_id,
            "title": "Try FizzWater",
            "productName": "FizzWater",
            "reason": "Half the sugar",
            "recommenderEmail": "recommender@example.com"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let recommendation = res.json::<Value>().await?;
    let rec_id = recommendation["id"].as_str().expect("rec id").to_string();

    let res = client
        .get(format!("{}/query/{}", server.base_url, query_id))
        .send()
        .await?;
    let query = res.json::<Value>().await?;
    assert_eq!(query["recommendationCount"], 1);

    // A recommendation against an unknown query fails without side effects.
    let res = client
        .post(format!("{}/recommendation/add", server.base_url))
        .json(&json!({
            "queryId": uuid_that_does_not_exist(),
            "title": "x",
            "productName": "x",
            "recommenderEmail": "recommender@example.com"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The asker is not the recommendation's owner: delete is denied and the
    // record survives.
    let res = client
        .delete(format!("{}/recommendation/{}", server.base_url, rec_id))
        .header("cookie", &asker)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(format!("{}/recommendation/{}", server.base_url, rec_id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Owner-scoped listings split mine vs. others.
    let res = client
        .get(format!("{}/recommendation/all", server.base_url))
        .header("cookie", &recommender)
        .send()
        .await?;
    let mine = res.json::<Vec<Value>>().await?;
    assert!(mine.iter().any(|r| r["id"] == rec_id.as_str()));

    let res = client
        .get(format!("{}/recommendation/foruser", server.base_url))
        .header("cookie", &recommender)
        .send()
        .await?;
    let others = res.json::<Vec<Value>>().await?;
    assert!(others.iter().all(|r| r["id"] != rec_id.as_str()));

    // The owner can delete.
    let res = client
        .delete(format!("{}/recommendation/{}", server.base_url, rec_id))
        .header("cookie", &recommender)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Query mutation is owner-only as well.
    let res = client
        .delete(format!("{}/query/{}", server.base_url, query_id))
        .header("cookie", &recommender)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .delete(format!("{}/query/{}", server.base_url, query_id))
        .header("cookie", &asker)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

fn uuid_that_does_not_exist() -> &'static str {
    "00000000-0000-0000-0000-000000000000"
}
