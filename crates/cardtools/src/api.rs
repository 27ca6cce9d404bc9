//! HTTP transport for the card API.
//!
//! A thin JSON client: base URL plus relative paths for the regular
//! endpoints, absolute URLs for pagination links. With `--debug` every
//! request and response gets a line on stderr, scoped to this client
//! instead of a process-wide flag.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use cardtools_core::card::ApiError;

use crate::prelude::*;

/// Public card API used when no override is given.
pub const DEFAULT_BASE_URL: &str = "https://api.scryfall.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub debug: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            debug: false,
        }
    }
}

/// Read-only JSON client for the card API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("cardtools/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET a path relative to the configured base URL.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        let base = self.config.base_url.trim_end_matches('/');
        let url = format!("{base}{path}");
        self.get_url(&url, query).await
    }

    /// GET an absolute URL. Pagination links come back absolute, so they
    /// bypass the base URL entirely.
    pub async fn get_url<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        if self.config.debug {
            eprintln!("[api] GET {}", display_url(url, query));
        }

        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let envelope = serde_json::from_str::<ApiError>(&body).ok();
            if self.config.debug {
                let code = envelope
                    .as_ref()
                    .and_then(|e| e.code.clone())
                    .unwrap_or_default();
                eprintln!("[api] {} {} {}", status.as_u16(), url, code);
            }
            let details = envelope.and_then(|e| e.details).unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {}", status.as_u16())
                } else {
                    body.trim().to_string()
                }
            });
            return Err(Error::Api {
                status: status.as_u16(),
                details,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if self.config.debug {
            let object = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|value| {
                    value
                        .get("object")
                        .and_then(|object| object.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_default();
            eprintln!("[api] {} {} {}", status.as_u16(), url, object);
        }

        serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
    }
}

/// Build the API client from the global CLI flags.
pub fn create_client(global: &crate::Global) -> Result<ApiClient> {
    ApiClient::new(ApiConfig {
        base_url: global.base_url.clone(),
        timeout: Duration::from_secs(global.timeout),
        debug: global.debug,
    })
}

fn display_url(url: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let params = query
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{url}?{params}")
}
