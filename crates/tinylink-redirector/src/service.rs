use std::sync::Arc;

use crate::redirector::Redirector;
use crate::RedirectorError;
use async_trait::async_trait;
use tinylink_core::{Registry, ShortCode, StorageError};
use tracing::{debug, trace};

/// Service for handling URL redirects.
///
/// Looks a short code up in the registry and bumps its click count before
/// handing back the destination.
#[derive(Debug, Clone)]
pub struct RedirectorService<R> {
    registry: Arc<R>,
}

impl<R: Registry> RedirectorService<R> {
    /// Creates a new RedirectorService with the given registry.
    pub fn new(registry: R) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Resolves a short code to its original URL.
    ///
    /// # Arguments
    ///
    /// * `code` - The short code to resolve
    ///
    /// # Returns
    ///
    /// * `Ok(url)` - The original URL; its click count went up by one
    /// * `Err(RedirectorError::NotFound)` - If the code doesn't exist, or was
    ///   deleted before the visit could be counted
    /// * `Err(e)` - If there was an error accessing the registry
    pub async fn resolve(&self, code: &ShortCode) -> crate::Result<String> {
        Redirector::resolve(self, code).await
    }
}

#[async_trait]
impl<R: Registry> Redirector for RedirectorService<R> {
    async fn resolve(&self, code: &ShortCode) -> crate::Result<String> {
        trace!(code = %code, "resolving short code");

        if self.registry.find_by_code(code).await?.is_none() {
            trace!(code = %code, "Short code not found");
            return Err(RedirectorError::NotFound(code.to_string()));
        }

        // The increment re-checks existence, so a concurrent delete between
        // the lookup and here surfaces as NotFound instead of a stale url.
        let record = match self.registry.increment_clicks(code).await {
            Ok(record) => record,
            Err(StorageError::NotFound(_)) => {
                debug!(code = %code, "Short code deleted while resolving");
                return Err(RedirectorError::NotFound(code.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        debug!(
            code = %code,
            url = %record.original_url,
            clicks = record.click_count,
            "Resolved short code"
        );
        Ok(record.original_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tinylink_core::registry::Result as RegistryResult;
    use tinylink_core::{LinkId, LinkRecord, ReadRegistry};
    use tinylink_storage::InMemoryRegistry;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    async fn setup_with_record(
        c: &str,
        url: &str,
    ) -> (RedirectorService<InMemoryRegistry>, InMemoryRegistry) {
        let registry = InMemoryRegistry::new();
        let id = registry.next_id().await.unwrap();
        registry
            .insert(LinkRecord::new(id, url, code(c), Timestamp::now()))
            .await
            .unwrap();
        (RedirectorService::new(registry.clone()), registry)
    }

    /// Deletes the record right after the lookup, as a concurrent delete would.
    struct DeletingRegistry {
        inner: InMemoryRegistry,
        armed: AtomicBool,
    }

    #[async_trait]
    impl ReadRegistry for DeletingRegistry {
        async fn find_by_code(&self, code: &ShortCode) -> RegistryResult<Option<LinkRecord>> {
            let found = self.inner.find_by_code(code).await?;
            if let Some(record) = &found {
                if self.armed.swap(false, Ordering::SeqCst) {
                    self.inner.delete_by_id(record.id).await?;
                }
            }
            Ok(found)
        }

        async fn find_by_url(&self, url: &str) -> RegistryResult<Option<LinkRecord>> {
            self.inner.find_by_url(url).await
        }

        async fn find_by_id(&self, id: LinkId) -> RegistryResult<Option<LinkRecord>> {
            self.inner.find_by_id(id).await
        }

        async fn list_all(&self) -> RegistryResult<Vec<LinkRecord>> {
            self.inner.list_all().await
        }
    }

    #[async_trait]
    impl Registry for DeletingRegistry {
        async fn next_id(&self) -> RegistryResult<LinkId> {
            self.inner.next_id().await
        }

        async fn insert(&self, record: LinkRecord) -> RegistryResult<LinkRecord> {
            self.inner.insert(record).await
        }

        async fn delete_by_id(&self, id: LinkId) -> RegistryResult<LinkRecord> {
            self.inner.delete_by_id(id).await
        }

        async fn increment_clicks(&self, code: &ShortCode) -> RegistryResult<LinkRecord> {
            self.inner.increment_clicks(code).await
        }
    }

    /// A backing store that times out on every call.
    struct TimingOutRegistry;

    fn timeout<T>() -> RegistryResult<T> {
        Err(StorageError::Timeout("no answer within 5s".to_string()))
    }

    #[async_trait]
    impl ReadRegistry for TimingOutRegistry {
        async fn find_by_code(&self, _: &ShortCode) -> RegistryResult<Option<LinkRecord>> {
            timeout()
        }

        async fn find_by_url(&self, _: &str) -> RegistryResult<Option<LinkRecord>> {
            timeout()
        }

        async fn find_by_id(&self, _: LinkId) -> RegistryResult<Option<LinkRecord>> {
            timeout()
        }

        async fn list_all(&self) -> RegistryResult<Vec<LinkRecord>> {
            timeout()
        }
    }

    #[async_trait]
    impl Registry for TimingOutRegistry {
        async fn next_id(&self) -> RegistryResult<LinkId> {
            timeout()
        }

        async fn insert(&self, _: LinkRecord) -> RegistryResult<LinkRecord> {
            timeout()
        }

        async fn delete_by_id(&self, _: LinkId) -> RegistryResult<LinkRecord> {
            timeout()
        }

        async fn increment_clicks(&self, _: &ShortCode) -> RegistryResult<LinkRecord> {
            timeout()
        }
    }

    #[tokio::test]
    async fn resolve_existing_code() {
        let (service, registry) = setup_with_record("abc123", "https://example.com").await;

        let url = service.resolve(&code("abc123")).await.unwrap();
        assert_eq!(url, "https://example.com");

        let stored = registry.find_by_code(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(stored.click_count, 1);
    }

    #[tokio::test]
    async fn every_resolve_counts() {
        let (service, registry) = setup_with_record("abc123", "https://example.com").await;

        for _ in 0..7 {
            service.resolve(&code("abc123")).await.unwrap();
        }

        let stored = registry.find_by_code(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(stored.click_count, 7);
    }

    #[tokio::test]
    async fn resolve_nonexistent_code() {
        let (service, registry) = setup_with_record("abc123", "https://example.com").await;

        let err = service.resolve(&code("doesNotExist")).await.unwrap_err();
        assert!(matches!(err, RedirectorError::NotFound(c) if c == "doesNotExist"));

        let stored = registry.find_by_code(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(stored.click_count, 0);
    }

    #[tokio::test]
    async fn resolve_fails_when_deleted_mid_flight() {
        let registry = DeletingRegistry {
            inner: InMemoryRegistry::new(),
            armed: AtomicBool::new(true),
        };
        let inner = registry.inner.clone();
        let id = inner.next_id().await.unwrap();
        let record = LinkRecord::new(id, "https://example.com", code("abc123"), Timestamp::now());
        inner.insert(record).await.unwrap();
        let service = RedirectorService::new(registry);

        let err = service.resolve(&code("abc123")).await.unwrap_err();
        assert!(matches!(err, RedirectorError::NotFound(_)));
        assert!(inner.is_empty());
    }

    #[tokio::test]
    async fn store_timeout_is_unavailable() {
        let service = RedirectorService::new(TimingOutRegistry);

        let err = service.resolve(&code("abc123")).await.unwrap_err();
        assert!(matches!(err, RedirectorError::StoreUnavailable(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_resolves_are_all_counted() {
        let (service, registry) = setup_with_record("abc123", "https://example.com").await;

        let mut handles = vec![];
        for _ in 0..100 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.resolve(&code("abc123")).await.unwrap()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), "https://example.com");
        }

        let stored = registry.find_by_code(&code("abc123")).await.unwrap().unwrap();
        assert_eq!(stored.click_count, 100);
    }
}
