//! KiwiVM API client.
//!
//! Calls `{base}/getServiceInfo` for a VEID. The API key travels in the query
//! string, so every error is stripped of its URL before it is stored or logged.

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use futures_util::future::join_all;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;

use super::types::ServiceInfo;
use crate::core::config;

/// Shown when credentials are absent.
pub const MSG_MISSING_CREDENTIALS: &str = "搬瓦工 API 凭证未在环境中设置。";
/// Shown when the API reports an error without a message.
pub const MSG_UNKNOWN_API_ERROR: &str = "API 返回未知错误";
/// Shown for every transport, status or decoding failure.
pub const MSG_NETWORK_ERROR: &str = "请求搬瓦工 API 时发生网络错误";

/// Failure of a single `getServiceInfo` lookup.
#[derive(Debug, Error)]
pub enum BwhError {
    /// VEID or API key is empty
    #[error("BWH_VEID or BWH_API_KEY is not set")]
    MissingCredentials,

    /// Request could not be sent or the response could not be read
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// API answered with a non-success HTTP status
    #[error("HTTP request failed with status: {0}")]
    Status(reqwest::StatusCode),

    /// Body was not a `getServiceInfo` JSON document
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// API answered with a non-zero, null or missing `error` code
    #[error("API error {}: {}", .code.map_or_else(|| "<none>".to_string(), |c| c.to_string()), .message.as_deref().unwrap_or("<no message>"))]
    Api { code: Option<i64>, message: Option<String> },
}

impl BwhError {
    /// Text suitable for showing to a Telegram user.
    pub fn user_message(&self) -> String {
        match self {
            BwhError::MissingCredentials => MSG_MISSING_CREDENTIALS.to_string(),
            BwhError::Api { message: Some(m), .. } if !m.is_empty() => m.clone(),
            BwhError::Api { .. } => MSG_UNKNOWN_API_ERROR.to_string(),
            BwhError::Network(_) | BwhError::Status(_) | BwhError::Decode(_) => MSG_NETWORK_ERROR.to_string(),
        }
    }

    /// Whether a new attempt may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            BwhError::Network(_) => true,
            BwhError::Status(status) => status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for BwhError {
    fn from(err: reqwest::Error) -> Self {
        BwhError::Network(err.without_url())
    }
}

/// Anything that can look up traffic usage for a VEID.
///
/// Implemented by [`BwhClient`]; handlers depend on the trait so they can be
/// driven by an in-memory source in tests.
#[async_trait]
pub trait TrafficSource: Send + Sync {
    async fn service_info(&self, veid: &str) -> Result<ServiceInfo, BwhError>;
}

/// Outcome of the lookup for one VPS.
#[derive(Debug)]
pub struct VpsTraffic {
    pub veid: String,
    pub result: Result<ServiceInfo, BwhError>,
}

/// HTTP client for the KiwiVM API
#[derive(Clone)]
pub struct BwhClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    max_retries: usize,
    retry_min_delay: Duration,
}

impl BwhClient {
    /// Creates a client against `base_url` (without trailing `/getServiceInfo`).
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        timeout: Duration,
        max_retries: usize,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            max_retries,
            retry_min_delay: config::bwh::retry_min_delay(),
        })
    }

    /// Creates a client from the `BWH_*` settings.
    pub fn from_settings(settings: &config::BwhSettings) -> Result<Self, reqwest::Error> {
        Self::new(
            settings.api_url.clone(),
            settings.api_key.clone(),
            settings.request_timeout,
            settings.max_retries,
        )
    }

    /// Overrides the first backoff delay.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_min_delay = delay;
        self
    }

    /// Fetches service info for `veid`, retrying transient failures.
    pub async fn get_service_info(&self, veid: &str) -> Result<ServiceInfo, BwhError> {
        if veid.trim().is_empty() || self.api_key.expose_secret().trim().is_empty() {
            log::error!("BWH_VEID or BWH_API_KEY is not provided");
            return Err(BwhError::MissingCredentials);
        }

        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.retry_min_delay)
            .with_max_times(self.max_retries);

        let result = (|| self.fetch_once(veid))
            .retry(backoff)
            .when(BwhError::is_transient)
            .notify(|err: &BwhError, delay: Duration| {
                log::warn!("BWH API lookup for VEID {} failed: {}. Retrying in {:?}", veid, err, delay);
            })
            .await;

        if let Err(ref e) = result {
            log::error!("BWH API lookup failed (VEID: {}): {}", veid, e);
        }
        result
    }

    async fn fetch_once(&self, veid: &str) -> Result<ServiceInfo, BwhError> {
        let url = format!("{}/getServiceInfo", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("veid", veid), ("api_key", self.api_key.expose_secret())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BwhError::Status(status));
        }

        let body = response.bytes().await?;
        let info: ServiceInfo = serde_json::from_slice(&body)?;
        if info.error != Some(0) {
            return Err(BwhError::Api {
                code: info.error,
                message: info.message,
            });
        }

        log::debug!("BWH API lookup for VEID {} succeeded", veid);
        Ok(info)
    }
}

#[async_trait]
impl TrafficSource for BwhClient {
    async fn service_info(&self, veid: &str) -> Result<ServiceInfo, BwhError> {
        self.get_service_info(veid).await
    }
}

/// Looks up every VEID concurrently, keeping the configured order.
pub async fn collect_traffic(source: &dyn TrafficSource, veids: &[String]) -> Vec<VpsTraffic> {
    let lookups = veids.iter().map(|veid| async move {
        VpsTraffic {
            veid: veid.clone(),
            result: source.service_info(veid).await,
        }
    });
    join_all(lookups).await
}
