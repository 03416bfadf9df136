//! Upstream rainfall open-data client

use std::time::Duration;

use reqwest::header;
use url::Url;

/// Upstream fetch failure taxonomy. The proxy maps every variant to the
/// same generic 500 envelope; the distinction is for logs.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream returned status {0}")]
    Status(u16),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),
}

/// Source of the raw upstream payload, behind a trait so tests can fake it.
#[async_trait::async_trait]
pub trait UpstreamSource: Send + Sync {
    /// Fetch the upstream JSON body verbatim.
    async fn fetch_raw(&self) -> Result<String, UpstreamError>;
}

/// Live client against the municipal rainfall API. The credential pair is a
/// fixed query-string key embedded server-side; callers of the proxy never
/// see it.
pub struct RainUpstream {
    client: reqwest::Client,
    url: Url,
}

impl RainUpstream {
    pub fn new(
        base_url: &str,
        login_id: &str,
        data_key: &str,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let mut url = Url::parse(base_url)?;
        url.query_pairs_mut()
            .append_pair("stationNo", "")
            .append_pair("loginId", login_id)
            .append_pair("dataKey", data_key);

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, url })
    }
}

#[async_trait::async_trait]
impl UpstreamSource for RainUpstream {
    async fn fetch_raw(&self) -> Result<String, UpstreamError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}
