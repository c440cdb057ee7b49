mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

use storefront_api::auth::TokenService;
use storefront_api::config::AppConfig;
use storefront_api::database::models::User;

use common::TestServer;

async fn seeded(server: &TestServer) -> Result<(String, i64)> {
    let token = server.access_token().await?;
    let product = server
        .create_product(&token, json!({ "name": "Guarded", "price": "5.00" }))
        .await?;
    let id = product["id"].as_i64().unwrap_or_default();
    Ok((token, id))
}

#[tokio::test]
async fn product_endpoints_require_authentication() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (token, id) = seeded(&server).await?;
    let item = format!("/products/{}/", id);
    let body = json!({ "name": "Hacked", "price": "0.01" });

    let cases = [
        (Method::GET, "/products/".to_string()),
        (Method::POST, "/products/".to_string()),
        (Method::GET, item.clone()),
        (Method::PUT, item.clone()),
        (Method::PATCH, item.clone()),
        (Method::DELETE, item.clone()),
    ];

    for (method, path) in cases {
        let res = server
            .client
            .request(method.clone(), server.url(&path))
            .json(&body)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{} {}", method, path);
        assert!(res.headers().contains_key("www-authenticate"));
    }

    let products = server.list_products(&token).await?;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Guarded");
    assert_eq!(products[0]["price"], "5.00");
    Ok(())
}

#[tokio::test]
async fn auth_runs_before_validation_and_lookup() -> Result<()> {
    let server = TestServer::spawn().await?;

    // Malformed body and missing record still answer 401 without a token
    let res = server
        .client
        .post(server.url("/products/"))
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server.client.get(server.url("/products/999/")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn invalid_credentials_are_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let pair = server.token_pair().await?;
    let refresh = pair["refresh"].as_str().unwrap_or_default().to_string();

    let bad_headers = [
        "Bearer not-a-token".to_string(),
        "Basic dGVzdHVzZXI6dGVzdA==".to_string(),
        "Bearer".to_string(),
        format!("Bearer {}", refresh),
    ];

    for header in bad_headers {
        let res = server
            .client
            .get(server.url("/products/"))
            .header("authorization", &header)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{}", header);
        let body = res.json::<Value>().await?;
        assert_eq!(body["code"], "UNAUTHORIZED");
    }
    Ok(())
}

#[tokio::test]
async fn public_endpoints_need_no_token() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.client.get(server.url("/health/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.signup("publicuser", "publicpass123").await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = server.login("publicuser", "publicpass123").await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn tokens_for_unknown_user_are_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let tokens = TokenService::new(&AppConfig::development().security);
    let ghost = User {
        id: uuid::Uuid::new_v4(),
        username: "ghost".to_string(),
        password_hash: String::new(),
        date_joined: chrono::Utc::now(),
    };
    let pair = tokens.issue_pair(&ghost)?;

    let res = server
        .client
        .get(server.url("/products/"))
        .bearer_auth(&pair.access)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server
        .client
        .post(server.url("/auth/token/refresh/"))
        .json(&json!({ "refresh": pair.refresh }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
