use async_trait::async_trait;
use funding_atlas_core::US_ATLAS_BASE_URL;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Resolution of the us-atlas topology a page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AtlasLevel {
    States,
    Counties,
}

impl AtlasLevel {
    pub fn file_name(&self) -> &'static str {
        match self {
            AtlasLevel::States => "states-10m.json",
            AtlasLevel::Counties => "counties-10m.json",
        }
    }

    pub fn url(&self) -> String {
        format!("{}/{}", US_ATLAS_BASE_URL, self.file_name())
    }
}

/// External data unavailable. Every variant means the atlas could not be
/// obtained; they differ only in where the request broke down.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("external data unavailable, request to {url} failed: {reason}")]
    Request { url: String, reason: String },
    #[error("external data unavailable, {url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("external data unavailable, {url} returned invalid json: {reason}")]
    Decode { url: String, reason: String },
}

/// Capability to GET a URL and parse its body as JSON.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AtlasFetch: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, Error>;
}

/// Plain GET over reqwest: no extra headers, no retry, no timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Fails only if the TLS backend cannot be initialised, which is a
    /// startup fault rather than unavailable data.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AtlasFetch for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, Error> {
        debug!("requesting: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Request {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("error response from {}: {}", url, status);
            return Err(Error::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| Error::Request {
            url: url.to_owned(),
            reason: format!("error reading body: {}", e),
        })?;
        debug!("received {} bytes from {}", body.len(), url);

        serde_json::from_slice(&body).map_err(|e| Error::Decode {
            url: url.to_owned(),
            reason: e.to_string(),
        })
    }
}
