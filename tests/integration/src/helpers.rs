//! Test helpers for integration tests
//!
//! Spawns an in-process server on the in-memory store and wraps the HTTP
//! calls the tests make. The claimed identity travels in the `user` header.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use room_api::{create_app, create_app_state};
use room_common::AppConfig;
use room_service::{Sweeper, SweeperHandle, SweeperSettings};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    handle: JoinHandle<()>,
    sweeper: Option<SweeperHandle>,
}

impl TestServer {
    /// Start a server on the in-memory store, without the sweeper
    pub async fn start() -> Result<Self> {
        Self::start_with(&[], false).await
    }

    /// Start a server with the sweeper running on the given timings
    pub async fn start_with_sweeper(ttl_secs: u64, interval_secs: u64) -> Result<Self> {
        let ttl = ttl_secs.to_string();
        let interval = interval_secs.to_string();
        Self::start_with(
            &[
                ("PRESENCE_TTL_SECS", ttl.as_str()),
                ("SWEEP_INTERVAL_SECS", interval.as_str()),
            ],
            true,
        )
        .await
    }

    /// Start a server from explicit variables on top of [`test_config`]
    pub async fn start_with(overrides: &[(&str, &str)], sweep: bool) -> Result<Self> {
        let config = test_config(overrides)?;
        let settings = SweeperSettings::from(&config.presence);

        let state = create_app_state(config).await?;
        let app = create_app(state.clone())?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let sweeper = sweep.then(|| Sweeper::spawn(state.shared_context(), settings));

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            handle,
            sweeper,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Start a request, optionally claiming `user`
    pub fn request(&self, method: Method, path: &str, user: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url(), path);
        let builder = self.client.request(method, url);
        match user {
            Some(user) => builder.header("user", user),
            None => builder,
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, None).send().await?)
    }

    /// Make a GET request as `user`
    pub async fn get_as(&self, path: &str, user: &str) -> Result<Response> {
        Ok(self.request(Method::GET, path, Some(user)).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.request(Method::POST, path, None).json(body).send().await?)
    }

    /// Make a POST request with JSON body as `user`
    pub async fn post_as<T: Serialize>(&self, path: &str, user: &str, body: &T) -> Result<Response> {
        Ok(self
            .request(Method::POST, path, Some(user))
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with JSON body as `user`
    pub async fn put_as<T: Serialize>(&self, path: &str, user: &str, body: &T) -> Result<Response> {
        Ok(self
            .request(Method::PUT, path, Some(user))
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request as `user`
    pub async fn delete_as(&self, path: &str, user: &str) -> Result<Response> {
        Ok(self.request(Method::DELETE, path, Some(user)).send().await?)
    }

    /// Stop the sweeper and the server
    pub async fn stop(mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.shutdown().await;
        }
        self.handle.abort();
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Create a test configuration on the in-memory store
///
/// Rate limits are raised so a test never trips them by accident.
pub fn test_config(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let defaults = [
        ("STORE_BACKEND", "memory"),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "1000"),
    ];

    AppConfig::from_lookup(|key| {
        overrides
            .iter()
            .chain(defaults.iter())
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    })
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
