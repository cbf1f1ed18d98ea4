use hyper::ext::ReasonPhrase;
use reqwest::{header::CONTENT_TYPE, Client, Response, Url};
use std::time::Duration;

use crate::{env::config::FetchConfig, models::source::FetchResult};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("response body exceeded {limit} bytes")]
    TooLarge { limit: usize },

    #[error("network error")]
    Transport(#[source] reqwest::Error),
}

impl FetchError {
    /// Short cause shown to the caller next to the generic failure message.
    pub fn summary(&self) -> String {
        match self {
            FetchError::Status {
                status,
                status_text,
            } => format!("HTTP {} {}", status, status_text),
            FetchError::Timeout(_) => "request timed out".to_string(),
            FetchError::TooLarge { .. } => "response too large".to_string(),
            FetchError::Transport(_) => "network error".to_string(),
        }
    }
}

/// Single-attempt GET client for upstream resources.
///
/// The client-level timeout covers connecting, headers and the full body read.
/// Without `max_body_bytes` the whole body is buffered regardless of size.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    timeout: Duration,
    max_body_bytes: Option<usize>,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Uses a prebuilt client; its timeout and user agent should match `config`.
    pub fn with_client(client: Client, config: &FetchConfig) -> Self {
        Self {
            client,
            timeout: config.timeout,
            max_body_bytes: config.max_body_bytes,
        }
    }

    pub async fn fetch(&self, url: &Url) -> Result<FetchResult, FetchError> {
        log::debug!("Fetching {}", url);

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                status_text: status_text(&response),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

        let body = self.read_body(&mut response).await?;
        log::debug!("Fetched {} ({} bytes, status {})", url, body.len(), status);

        Ok(FetchResult {
            raw_body: String::from_utf8_lossy(&body).into_owned(),
            content_type,
            http_status: status.as_u16(),
        })
    }

    async fn read_body(&self, response: &mut Response) -> Result<Vec<u8>, FetchError> {
        if let (Some(limit), Some(length)) = (self.max_body_bytes, response.content_length()) {
            if length > limit as u64 {
                return Err(FetchError::TooLarge { limit });
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.transport_error(e))?
        {
            if let Some(limit) = self.max_body_bytes {
                if body.len() + chunk.len() > limit {
                    return Err(FetchError::TooLarge { limit });
                }
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }

    fn transport_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Transport(err)
        }
    }
}

/// Reason phrase as sent by the upstream, falling back to the canonical one.
fn status_text(response: &Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string(),
    }
}
