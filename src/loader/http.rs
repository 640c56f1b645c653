use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::{ContentResult, ContentRef, Loader};

/// The response was delivered but cannot be used.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("oracle responded with HTTP {0}")]
    Status(u16),
    #[error("oracle response is missing the answer or image")]
    Incomplete,
}

/// Wire shape of the oracle API.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    answer: String,
    #[serde(default)]
    forced: bool,
    image: String,
}

/// Asks the remote yes/no oracle over HTTP.
pub struct HttpLoader {
    client: reqwest::Client,
    api_url: String,
}

impl HttpLoader {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("yesno/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }
}

#[async_trait]
impl Loader for HttpLoader {
    async fn load(&self) -> Result<ContentResult> {
        debug!(url = %self.api_url, "requesting answer");

        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .context("request to oracle failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResponseError::Status(status.as_u16()).into());
        }

        let body: ApiResponse = response
            .json()
            .await
            .context("failed to decode oracle response")?;

        if body.answer.trim().is_empty() || body.image.trim().is_empty() {
            return Err(ResponseError::Incomplete.into());
        }

        Ok(ContentResult {
            content: ContentRef::new(body.image),
            answer: body.answer,
            forced: body.forced,
        })
    }
}
