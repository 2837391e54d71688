use crate::traits::ResolveError;
use async_trait::async_trait;
use qr_guard_policy::ShortLinkResolver;
use reqwest::{redirect, Client};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
    pub max_redirects: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// Expands short links with a HEAD request that follows redirects.
///
/// The URL is taken verbatim from the scan; no authentication and no custom
/// headers are sent.
pub struct HttpShortLinkResolver {
    client: Client,
}

impl HttpShortLinkResolver {
    pub fn new(options: ResolverOptions) -> Result<Self, ResolveError> {
        let mut builder = Client::builder().redirect(redirect::Policy::limited(options.max_redirects));
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }

    /// Final landing URL, with the failure reason when there is none.
    pub async fn try_resolve(&self, url: &str) -> Result<String, ResolveError> {
        let response = self.client.head(url).send().await?;
        debug!("HEAD {} landed on {} ({})", url, response.url(), response.status());
        Ok(response.url().to_string())
    }
}

#[async_trait]
impl ShortLinkResolver for HttpShortLinkResolver {
    async fn resolve(&self, url: &str) -> Option<String> {
        match self.try_resolve(url).await {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                warn!("Short link expansion failed for {}: {}", url, e);
                None
            }
        }
    }
}
