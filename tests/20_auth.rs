mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{TestServer, PASSWORD, USERNAME};

#[tokio::test]
async fn signup_creates_user_without_echoing_password() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.signup(USERNAME, PASSWORD).await?;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({ "username": USERNAME }));
    Ok(())
}

#[tokio::test]
async fn duplicate_signup_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.signup(USERNAME, PASSWORD).await?;

    let res = server.signup(USERNAME, "another-password").await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["username"].is_string(), "missing username error: {}", body);

    // The original account still logs in with the original password only
    assert_eq!(server.login(USERNAME, PASSWORD).await?.status(), StatusCode::OK);
    assert_eq!(
        server.login(USERNAME, "another-password").await?.status(),
        StatusCode::UNAUTHORIZED
    );
    Ok(())
}

#[tokio::test]
async fn signup_requires_both_fields() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/auth/signup/"))
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["field_errors"]["username"], "This field is required.");
    assert_eq!(body["field_errors"]["password"], "This field is required.");
    Ok(())
}

#[tokio::test]
async fn login_returns_token_pair() -> Result<()> {
    let server = TestServer::spawn().await?;

    let pair = server.token_pair().await?;

    assert!(pair["access"].is_string(), "missing access: {}", pair);
    assert!(pair["refresh"].is_string(), "missing refresh: {}", pair);
    assert_ne!(pair["access"], pair["refresh"]);
    Ok(())
}

#[tokio::test]
async fn login_with_bad_credentials_is_401() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.signup(USERNAME, PASSWORD).await?;

    let wrong_password = server.login(USERNAME, "wrong-password").await?;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown_user = server.login("nobody", PASSWORD).await?;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let body = unknown_user.json::<Value>().await?;
    assert_eq!(body["message"], "No active account found with the given credentials");
    Ok(())
}

#[tokio::test]
async fn refresh_issues_usable_access_token() -> Result<()> {
    let server = TestServer::spawn().await?;
    let pair = server.token_pair().await?;

    let res = server
        .client
        .post(server.url("/auth/token/refresh/"))
        .json(&json!({ "refresh": pair["refresh"] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    let access = body["access"].as_str().expect("access token");

    let res = server
        .client
        .get(server.url("/products/"))
        .bearer_auth(access)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn refresh_rejects_access_token_and_garbage() -> Result<()> {
    let server = TestServer::spawn().await?;
    let pair = server.token_pair().await?;

    for token in [pair["access"].clone(), json!("not-a-token")] {
        let res = server
            .client
            .post(server.url("/auth/token/refresh/"))
            .json(&json!({ "refresh": token }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    let res = server
        .client
        .post(server.url("/auth/token/refresh/"))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn login_trims_username_like_signup() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.signup(" padded ", PASSWORD).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?["username"], "padded");

    assert_eq!(server.login(" padded ", PASSWORD).await?.status(), StatusCode::OK);
    assert_eq!(server.login("padded", PASSWORD).await?.status(), StatusCode::OK);
    Ok(())
}
