//! HTTP accessor for the spreadsheet-backed packing service.
//!
//! Issues a single `GET` per fetch over a pooled reqwest client (rustls for
//! `https://`) and hands the JSON body back untouched. The body is read
//! through a size cap.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use packing_core::PackingBatches;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};

use crate::{PackingSource, SourceConfig, SourceError};

/// Longest slice of an error body kept in [`SourceError::UpstreamStatus`].
const MAX_ERROR_BODY: usize = 512;

/// Fetches packing batches from an HTTP endpoint.
#[derive(Clone)]
pub struct HttpPackingSource {
    client: Client,
    url: Url,
    bearer_token: Option<String>,
    timeout: Duration,
    max_body_bytes: usize,
}

impl HttpPackingSource {
    /// Build a source from `config`.
    ///
    /// # Errors
    /// Returns [`SourceError::InvalidUrl`] if the URL does not parse,
    /// [`SourceError::UnsupportedScheme`] if it is neither `http://` nor
    /// `https://`, or [`SourceError::Request`] if the client cannot be built.
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let url = Url::parse(&config.url).map_err(|e| SourceError::InvalidUrl {
            url: config.url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(SourceError::UnsupportedScheme { url: config.url });
        }

        let client = Client::builder()
            .build()
            .map_err(|e| SourceError::Request(format!("build client: {e}")))?;

        Ok(Self {
            client,
            url,
            bearer_token: config.bearer_token,
            timeout: config.timeout,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// The upstream endpoint this source reads from.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn request_batches(&self) -> Result<PackingBatches, SourceError> {
        let mut req = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "application/json");

        if let Some(token) = &self.bearer_token {
            req = req.bearer_auth(token);
        }

        tracing::debug!(url = %self.url, "fetching packing batches");

        let resp = req
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = resp.status();
        let limit = self.max_body_bytes;
        let body = Limited::new(reqwest::Body::from(resp), limit)
            .collect()
            .await
            .map_err(|e| {
                if e.is::<LengthLimitError>() {
                    SourceError::BodyTooLarge { limit }
                } else {
                    SourceError::Transport(format!("read response body: {e}"))
                }
            })?
            .to_bytes();

        tracing::debug!(url = %self.url, %status, bytes = body.len(), "packing upstream responded");

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            let body = text.chars().take(MAX_ERROR_BODY).collect();
            return Err(SourceError::UpstreamStatus { status: status.as_u16(), body });
        }

        PackingBatches::from_slice(&body).map_err(SourceError::from)
    }
}

#[async_trait]
impl PackingSource for HttpPackingSource {
    async fn fetch_batches(&self) -> Result<PackingBatches, SourceError> {
        match tokio::time::timeout(self.timeout, self.request_batches()).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout { after: self.timeout }),
        }
    }
}

impl fmt::Debug for HttpPackingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPackingSource")
            .field("url", &self.url.as_str())
            .field("authenticated", &self.bearer_token.is_some())
            .field("timeout", &self.timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish_non_exhaustive()
    }
}
