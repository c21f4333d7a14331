use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tinylink_core::registry::{ReadRegistry, Registry, Result};
use tinylink_core::{Conflict, LinkId, LinkRecord, ShortCode, StorageError};
use tracing::trace;

/// In-memory storage entry for a link record.
#[derive(Debug, Clone)]
struct Entry {
    record: LinkRecord,
    /// Position in insertion order, used to break `created_at` ties.
    seq: u64,
}

/// The three indices over the same set of records.
///
/// `by_id` owns the records; `by_code` and `by_url` point into it.
#[derive(Debug, Default)]
struct Indices {
    by_id: HashMap<LinkId, Entry>,
    by_code: HashMap<ShortCode, LinkId>,
    by_url: HashMap<String, LinkId>,
    next_seq: u64,
}

impl Indices {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            by_id: HashMap::with_capacity(capacity),
            by_code: HashMap::with_capacity(capacity),
            by_url: HashMap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    fn lookup(&self, id: Option<&LinkId>) -> Option<LinkRecord> {
        id.and_then(|id| self.by_id.get(id))
            .map(|entry| entry.record.clone())
    }
}

#[derive(Debug, Default)]
struct Inner {
    indices: RwLock<Indices>,
    last_id: AtomicU64,
}

/// In-memory implementation of the [`Registry`] trait.
///
/// All three indices sit behind a single `RwLock`, so every insert, delete
/// and click increment is one critical section and readers never see a
/// record that is only partially indexed. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    inner: Arc<Inner>,
}

impl InMemoryRegistry {
    /// Creates a new, empty in-memory registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory registry with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                indices: RwLock::new(Indices::with_capacity(capacity)),
                last_id: AtomicU64::new(0),
            }),
        }
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.inner.indices.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReadRegistry for InMemoryRegistry {
    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<LinkRecord>> {
        let indices = self.inner.indices.read();
        Ok(indices.lookup(indices.by_code.get(code)))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<LinkRecord>> {
        let indices = self.inner.indices.read();
        Ok(indices.lookup(indices.by_url.get(url)))
    }

    async fn find_by_id(&self, id: LinkId) -> Result<Option<LinkRecord>> {
        let indices = self.inner.indices.read();
        Ok(indices.lookup(Some(&id)))
    }

    async fn list_all(&self) -> Result<Vec<LinkRecord>> {
        let indices = self.inner.indices.read();
        let mut entries: Vec<&Entry> = indices.by_id.values().collect();
        entries.sort_by(|a, b| {
            b.record
                .created_at
                .cmp(&a.record.created_at)
                .then(a.seq.cmp(&b.seq))
        });
        Ok(entries.into_iter().map(|e| e.record.clone()).collect())
    }
}

#[async_trait]
impl Registry for InMemoryRegistry {
    async fn next_id(&self) -> Result<LinkId> {
        let id = self.inner.last_id.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(LinkId::new(id))
    }

    async fn insert(&self, record: LinkRecord) -> Result<LinkRecord> {
        let mut indices = self.inner.indices.write();

        if indices.by_code.contains_key(&record.short_code) {
            return Err(Conflict::Code(record.short_code).into());
        }
        if indices.by_url.contains_key(&record.original_url) {
            return Err(Conflict::Url(record.original_url).into());
        }
        if indices.by_id.contains_key(&record.id) {
            return Err(StorageError::InvalidData(format!(
                "link id {} is already in use",
                record.id
            )));
        }

        let seq = indices.next_seq;
        indices.next_seq += 1;
        indices.by_code.insert(record.short_code.clone(), record.id);
        indices.by_url.insert(record.original_url.clone(), record.id);
        indices.by_id.insert(
            record.id,
            Entry {
                record: record.clone(),
                seq,
            },
        );

        trace!(id = %record.id, code = %record.short_code, "inserted link record");
        Ok(record)
    }

    async fn delete_by_id(&self, id: LinkId) -> Result<LinkRecord> {
        let mut indices = self.inner.indices.write();

        let Some(entry) = indices.by_id.remove(&id) else {
            return Err(StorageError::link_not_found(id));
        };
        indices.by_code.remove(&entry.record.short_code);
        indices.by_url.remove(&entry.record.original_url);

        trace!(id = %id, code = %entry.record.short_code, "removed link record");
        Ok(entry.record)
    }

    async fn increment_clicks(&self, code: &ShortCode) -> Result<LinkRecord> {
        let mut indices = self.inner.indices.write();

        let Some(id) = indices.by_code.get(code).copied() else {
            return Err(StorageError::code_not_found(code));
        };
        let Some(entry) = indices.by_id.get_mut(&id) else {
            return Err(StorageError::InvalidData(format!(
                "code {code} points at missing id {id}"
            )));
        };

        entry.record.click_count += 1;
        Ok(entry.record.clone())
    }
}
