//! No-WASM HTTP client implementation using reqwest
//!
//! This module provides HTTP functionality for non-WASM environments
//! using the reqwest crate for making HTTP requests.

use reqwest::{header, Client, Response};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::interface::{HttpClient, RequestApi};
use crate::model::{ActivityCatalog, ApiReply, EnrollmentParams};

/// HTTP client for no-WASM environments using reqwest
#[derive(Debug, Clone)]
pub struct NoWasmClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient for NoWasmClient {
    async fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

impl NoWasmClient {
    async fn into_reply(resp: Response) -> Result<ApiReply> {
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        log::debug!("Response {status}: {} bytes", text.len());
        Ok(ApiReply::from_text(status, &text))
    }
}

impl RequestApi for NoWasmClient {
    async fn fetch_activities(&self) -> Result<ActivityCatalog> {
        let url = self.config.activities_url()?;
        log::debug!("GET {url}");

        let resp = self.client.get(url).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        ActivityCatalog::from_response(status, &text)
    }

    async fn signup(&self, params: EnrollmentParams<'_>) -> Result<ApiReply> {
        let url = self
            .config
            .enrollment_url(params.activity, "signup", params.email)?;
        log::debug!("POST {url}");

        let resp = self.client.post(url).send().await?;
        Self::into_reply(resp).await
    }

    async fn unregister(&self, params: EnrollmentParams<'_>) -> Result<ApiReply> {
        let url = self
            .config
            .enrollment_url(params.activity, "unregister", params.email)?;
        log::debug!("DELETE {url}");

        let resp = self.client.delete(url).send().await?;
        Self::into_reply(resp).await
    }
}
