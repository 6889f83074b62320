use std::error::Error;

use async_trait::async_trait;

#[async_trait]
pub trait FeedSource {
    /// Returns the raw text of the calendar feed.
    /// This function may trigger a network request (that can be a long process, or that can even fail, e.g. in case of an unreachable server)
    async fn fetch(&self) -> Result<String, Box<dyn Error>>;
}
