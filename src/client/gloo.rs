//! WASM HTTP client implementation using gloo_net
//!
//! This module provides HTTP functionality for WASM environments
//! using the gloo_net crate for making HTTP requests via the browser's fetch API.

use gloo_net::http::{Request, RequestBuilder, Response};
use web_sys::RequestCredentials;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::interface::{HttpClient, RequestApi};
use crate::model::{ActivityCatalog, ApiReply, EnrollmentParams};

/// HTTP client for WASM environments using gloo_net
#[derive(Debug, Clone)]
pub struct WasmClient {
    config: ClientConfig,
}

impl HttpClient for WasmClient {
    async fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
        })
    }
}

impl WasmClient {
    /// Build a request with common headers and settings
    fn build_request(method: &str, url: &str) -> RequestBuilder {
        let builder = match method {
            "POST" => Request::post(url),
            "DELETE" => Request::delete(url),
            _ => Request::get(url),
        };

        builder
            .credentials(RequestCredentials::SameOrigin)
            .header("Accept", "application/json")
    }

    async fn into_reply(resp: Response) -> Result<ApiReply> {
        let status = resp.status();
        let text = resp.text().await?;
        log::debug!("Response {status}: {} bytes", text.len());
        Ok(ApiReply::from_text(status, &text))
    }
}

impl RequestApi for WasmClient {
    async fn fetch_activities(&self) -> Result<ActivityCatalog> {
        let url = self.config.activities_url()?;
        log::debug!("GET {url}");

        let resp = Self::build_request("GET", url.as_str()).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        ActivityCatalog::from_response(status, &text)
    }

    async fn signup(&self, params: EnrollmentParams<'_>) -> Result<ApiReply> {
        let url = self
            .config
            .enrollment_url(params.activity, "signup", params.email)?;
        log::debug!("POST {url}");

        let resp = Self::build_request("POST", url.as_str()).send().await?;
        Self::into_reply(resp).await
    }

    async fn unregister(&self, params: EnrollmentParams<'_>) -> Result<ApiReply> {
        let url = self
            .config
            .enrollment_url(params.activity, "unregister", params.email)?;
        log::debug!("DELETE {url}");

        let resp = Self::build_request("DELETE", url.as_str()).send().await?;
        Self::into_reply(resp).await
    }
}
