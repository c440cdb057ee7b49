#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use storefront_api::config::AppConfig;
use storefront_api::database::Store;
use storefront_api::{app, AppState};

pub const USERNAME: &str = "testuser";
pub const PASSWORD: &str = "testpassword123";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start the app on a free port with an empty in-memory store
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = port;
        config.api.enable_request_logging = false;

        let state = AppState::new(config, Store::memory());
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app(state)).await {
                eprintln!("test server stopped: {}", e);
            }
        });

        Ok(Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn signup(&self, username: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/auth/signup/"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/auth/login/"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    /// Sign up the default user and return its token pair as JSON
    pub async fn token_pair(&self) -> Result<Value> {
        let res = self.signup(USERNAME, PASSWORD).await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());

        let res = self.login(USERNAME, PASSWORD).await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        Ok(res.json::<Value>().await?)
    }

    /// Sign up the default user and return a bearer access token
    pub async fn access_token(&self) -> Result<String> {
        let pair = self.token_pair().await?;
        pair["access"]
            .as_str()
            .map(str::to_string)
            .context("login response missing access token")
    }

    pub async fn create_product(&self, token: &str, body: Value) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/products/"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
        Ok(res.json::<Value>().await?)
    }

    pub async fn list_products(&self, token: &str) -> Result<Vec<Value>> {
        let res = self
            .client
            .get(self.url("/products/"))
            .bearer_auth(token)
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "list failed: {}", res.status());
        Ok(res.json::<Vec<Value>>().await?)
    }
}
