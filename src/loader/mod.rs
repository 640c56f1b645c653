pub mod http;
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

/// Where the displayable content for an answer lives (a GIF URL for the
/// HTTP loader).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRef(String);

impl ContentRef {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a successful load produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentResult {
    pub content: ContentRef,
    pub answer: String,
    /// The oracle was told what to say rather than rolling the dice.
    pub forced: bool,
}

impl ContentResult {
    pub fn new(content: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            content: ContentRef::new(content),
            answer: answer.into(),
            forced: false,
        }
    }
}

/// Fetches one answer. Could be the remote oracle or a test script.
#[async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self) -> Result<ContentResult>;
}
