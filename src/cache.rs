//! This module provides an in-memory cache for fetched feed bodies
//!
//! The remote feed barely changes from one page render to the next, so fetched bodies are
//! kept for a freshness window (one hour, see [`CACHE_TTL`](crate::settings::CACHE_TTL))
//! before the next fetch actually touches the network. A render served a stale body simply
//! shows a slightly outdated event.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use url::Url;

use crate::settings::CACHE_TTL;

/// The process-wide feed cache, keyed by URL.
/// Every [`FeedClient`](crate::client::FeedClient) shares it, so two clients polling the
/// same feed spare a request.
pub(crate) static FEED_CACHE: Lazy<FeedCache> = Lazy::new(FeedCache::new);

/// A cache of feed bodies with a freshness window
pub struct FeedCache {
    entries: Mutex<HashMap<Url, CachedBody>>,
    ttl: Duration,
}

struct CachedBody {
    fetched_at: Instant,
    body: String,
}

impl FeedCache {
    fn new() -> Self {
        Self::with_ttl(CACHE_TTL)
    }

    fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Return the body cached for this URL, as long as it is still inside the freshness window
    pub fn fresh_body(&self, url: &Url) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        entries.get(url)
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.body.clone())
    }

    /// Store a freshly fetched body.
    /// An expired entry for the same URL is replaced; a fetch failure should simply not call this, so it never evicts anything
    pub fn store(&self, url: &Url, body: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(url.clone(), CachedBody {
            fetched_at: Instant::now(),
            body: body.to_string(),
        });
    }
}
