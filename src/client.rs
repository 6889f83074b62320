//! This module provides a client to fetch a calendar feed over HTTP

use std::error::Error;

use async_trait::async_trait;
use url::Url;

use crate::cache::FEED_CACHE;
use crate::traits::FeedSource;

/// A [`FeedSource`] that fetches its data from a public HTTP endpoint.
///
/// Bodies are cached process-wide for an hour (see [`cache`](crate::cache)), so calling
/// [`fetch`](FeedSource::fetch) repeatedly does not hammer the calendar host. There is no
/// retry and no explicit timeout: a hanging request is bounded only by whatever `reqwest`
/// enforces.
pub struct FeedClient {
    url: Url,
}

impl FeedClient {
    /// Create a client for the given feed URL. This does not start a connection
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn download(&self) -> Result<String, Box<dyn Error>> {
        let response = reqwest::Client::new()
            .get(self.url.clone())
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(format!("Unexpected HTTP status code {:?}", response.status()).into());
        }

        let text = response.text().await?;
        Ok(text)
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch(&self) -> Result<String, Box<dyn Error>> {
        if let Some(body) = FEED_CACHE.fresh_body(&self.url) {
            log::debug!("Feed for {} is still fresh in the cache", self.url);
            return Ok(body);
        }

        match self.download().await {
            Ok(body) => {
                FEED_CACHE.store(&self.url, &body);
                Ok(body)
            },
            Err(err) => {
                log::warn!("Unable to fetch the feed at {}: {}", self.url, err);
                Err(err)
            },
        }
    }
}
