mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn register_returns_projection_without_password() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();
    let username = common::unique_username("reg");

    let body = common::register(&client, server, &username, "rahasia").await?;
    assert_eq!(body, json!({ "data": { "username": username, "name": "Test User" } }));
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_rejected() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();
    let username = common::unique_username("dup");
    common::register(&client, server, &username, "rahasia").await?;

    let res = client
        .post(server.url("/api/users"))
        .json(&json!({ "username": username, "password": "other", "name": "Other" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["errors"], "username already exists");
    Ok(())
}

#[tokio::test]
async fn concurrent_registrations_create_exactly_one_user() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();
    let username = common::unique_username("race");

    let attempts = (0..5).map(|_| {
        client
            .post(server.url("/api/users"))
            .json(&json!({ "username": username, "password": "rahasia", "name": "Racer" }))
            .send()
    });
    let mut ok = 0;
    let mut rejected = 0;
    for res in spawn_all(attempts).await {
        match res?.status() {
            StatusCode::OK => ok += 1,
            StatusCode::BAD_REQUEST => rejected += 1,
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(rejected, 4);
    Ok(())
}

/// Drive the requests concurrently on the test runtime
async fn spawn_all<F, T>(futures: impl Iterator<Item = F>) -> Vec<T>
where
    F: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handles = futures.map(tokio::spawn).collect::<Vec<_>>();
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.expect("request task panicked"));
    }
    results
}

#[tokio::test]
async fn invalid_registration_is_400() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/users"))
        .json(&json!({ "username": "", "password": "", "name": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["errors"].as_str().unwrap_or_default().contains("username"));
    Ok(())
}

#[tokio::test]
async fn wrong_username_and_wrong_password_are_indistinguishable() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();
    let username = common::unique_username("cred");
    common::register(&client, server, &username, "rahasia").await?;

    let wrong_password = client
        .post(server.url("/api/users/login"))
        .json(&json!({ "username": username, "password": "salah" }))
        .send()
        .await?;
    let unknown_user = client
        .post(server.url("/api/users/login"))
        .json(&json!({ "username": common::unique_username("ghost"), "password": "rahasia" }))
        .send()
        .await?;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let a: Value = wrong_password.json().await?;
    let b: Value = unknown_user.json().await?;
    assert_eq!(a, b);
    assert_eq!(a["errors"], "username or password is wrong");
    Ok(())
}

#[tokio::test]
async fn new_login_rotates_the_token() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();
    let username = common::unique_username("rot");
    common::register(&client, server, &username, "rahasia").await?;

    let first = common::login(&client, server, &username, "rahasia").await?;
    let second = common::login(&client, server, &username, "rahasia").await?;
    assert_ne!(first, second);

    let res = client.get(server.url("/api/users/current")).bearer_auth(&first).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client.get(server.url("/api/users/current")).bearer_auth(&second).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn current_user_accepts_either_header() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();
    let (username, token) = common::new_session(&client, server, "cur").await?;

    let res = client.get(server.url("/api/users/current")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "data": { "username": username, "name": "Test User" } }));

    let res = client
        .get(server.url("/api/users/current"))
        .header("X-API-TOKEN", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(server.url("/api/users/current"))
        .bearer_auth("not-a-real-token")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["errors"], "Unauthorized");
    Ok(())
}

#[tokio::test]
async fn update_changes_name_and_password() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();
    let (username, token) = common::new_session(&client, server, "upd").await?;

    let res = client
        .patch(server.url("/api/users/current"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Renamed" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["name"], "Renamed");

    let res = client
        .patch(server.url("/api/users/current"))
        .bearer_auth(&token)
        .json(&json!({ "password": "baru" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["name"], "Renamed");

    assert!(common::login(&client, server, &username, "rahasia").await.is_err());
    common::login(&client, server, &username, "baru").await?;
    Ok(())
}

#[tokio::test]
async fn logout_invalidates_the_token() -> Result<()> {
    let Some(server) = common::ensure_server().await? else { return Ok(()) };
    let client = reqwest::Client::new();
    let (_, token) = common::new_session(&client, server, "out").await?;

    let res = client.delete(server.url("/api/users/current")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "data": "OK" }));

    let res = client.get(server.url("/api/users/current")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
