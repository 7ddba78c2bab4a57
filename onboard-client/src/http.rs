// onboard-client/src/http.rs
// HTTP transport; paths are relative to the API root (`employees/7`)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    /// GET with URL-encoded query parameters
    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// API root all paths are joined to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        tracing::debug!(%method, %url, "Sending request");
        self.client.request(method, url)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            tracing::warn!(status = status.as_u16(), body = %body, "Request failed");
            return Err(ClientError::from_status(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        // 204 and friends: decode as JSON null so `()`/`Value`/`Option` callers still work
        let bytes: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        self.handle_response(response).await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<T> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        self.handle_response(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::DELETE, path).send().await?;
        self.handle_response(response).await
    }
}
