use crate::error::StorageError;
use crate::link::{LinkId, LinkRecord};
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a link registry.
///
/// Absent records are `Ok(None)`, never an error.
#[async_trait]
pub trait ReadRegistry: Send + Sync + 'static {
    /// Retrieves the record for a given short code.
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<LinkRecord>>;

    /// Retrieves the live record for an original URL, if it was shortened before.
    async fn find_by_url(&self, url: &str) -> Result<Option<LinkRecord>>;

    async fn find_by_id(&self, id: LinkId) -> Result<Option<LinkRecord>>;

    /// Returns every live record, newest `created_at` first.
    ///
    /// Records created at the same instant keep their insertion order.
    async fn list_all(&self) -> Result<Vec<LinkRecord>>;
}

/// The authoritative store of link records.
///
/// Implementations keep the id, code and url indices consistent: a record is
/// either visible through all three or through none of them.
#[async_trait]
pub trait Registry: ReadRegistry {
    /// Allocates an id that has never been handed out before.
    async fn next_id(&self) -> Result<LinkId>;

    /// Inserts a new record.
    ///
    /// Returns `Err(Conflict(Code))` if the short code is taken and
    /// `Err(Conflict(Url))` if the original URL already has a record. Both
    /// checks and the insert are one atomic step.
    async fn insert(&self, record: LinkRecord) -> Result<LinkRecord>;

    /// Removes a record from every index and returns it.
    /// Returns `Err(NotFound)` if the id does not exist.
    async fn delete_by_id(&self, id: LinkId) -> Result<LinkRecord>;

    /// Adds exactly one to the click count of the record behind `code`.
    ///
    /// Returns the updated record, or `Err(NotFound)` if the code does not
    /// exist. Concurrent increments are never lost.
    async fn increment_clicks(&self, code: &ShortCode) -> Result<LinkRecord>;
}
