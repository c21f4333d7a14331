use crate::link::{LinkId, LinkRecord};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens `original_url` and returns its link record.
    ///
    /// Shortening a URL that already has a live record returns that record
    /// unchanged.
    async fn shorten(&self, original_url: &str) -> Result<LinkRecord>;

    /// Retrieves a link record by id.
    async fn get(&self, id: LinkId) -> Result<LinkRecord>;

    /// Lists all link records, newest first.
    async fn list(&self) -> Result<Vec<LinkRecord>>;

    /// Deletes a link record and returns it.
    async fn delete(&self, id: LinkId) -> Result<LinkRecord>;
}
