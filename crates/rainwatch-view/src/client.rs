//! Fetch client against the proxy endpoint

use std::time::Duration;

use anyhow::{bail, Context, Result};
use url::Url;

use rainwatch_core::{RainApiResponse, StationReading};

/// Source of reading snapshots, behind a trait so polling can be tested
/// without a live endpoint.
#[async_trait::async_trait]
pub trait ReadingSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<StationReading>>;
}

/// HTTP client for the dashboard's own `/api/rain` proxy.
pub struct ProxyClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ProxyClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).context("invalid rain endpoint url")?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait::async_trait]
impl ReadingSource for ProxyClient {
    async fn fetch(&self) -> Result<Vec<StationReading>> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .context("rain endpoint request failed")?;

        if !response.status().is_success() {
            bail!("rain endpoint returned status {}", response.status());
        }

        let envelope: RainApiResponse = response
            .json()
            .await
            .context("rain endpoint returned malformed payload")?;

        Ok(envelope.data)
    }
}
