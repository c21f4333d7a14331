use async_trait::async_trait;
use std::sync::Arc;
use tinylink_core::{
    Clock, Conflict, LinkId, LinkRecord, Registry, ShortCode, Shortener, ShortenerError,
    StorageError, SystemClock,
};
use tinylink_generator::Generator;
use tracing::{debug, info, trace, warn};
use typed_builder::TypedBuilder;
use url::Url;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Tunables for [`ShortenerService`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct ShortenerSettings {
    /// How many candidate codes to try before giving up with
    /// [`ShortenerError::ExhaustedRetries`].
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Registry` and a `Generator` to handle:
/// - URL validation
/// - Deduplication by original URL
/// - Short code generation, retrying on collisions
#[derive(Debug, Clone)]
pub struct ShortenerService<R, G, C = SystemClock> {
    registry: Arc<R>,
    generator: Arc<G>,
    clock: Arc<C>,
    settings: ShortenerSettings,
}

impl<R: Registry, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` with default settings.
    pub fn new(registry: R, generator: G) -> Self {
        Self::with_settings(registry, generator, ShortenerSettings::default())
    }

    pub fn with_settings(registry: R, generator: G, settings: ShortenerSettings) -> Self {
        Self::with_clock(registry, generator, settings, SystemClock)
    }
}

impl<R: Registry, G: Generator, C: Clock> ShortenerService<R, G, C> {
    /// Creates a new `ShortenerService` that stamps records with `clock`.
    pub fn with_clock(registry: R, generator: G, settings: ShortenerSettings, clock: C) -> Self {
        Self {
            registry: Arc::new(registry),
            generator: Arc::new(generator),
            clock: Arc::new(clock),
            settings,
        }
    }

    /// Validates that the URL is absolute and has a scheme and a host.
    fn validate_url(url: &str) -> Result<(), ShortenerError> {
        if url.is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        if url.trim() != url {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must not have surrounding whitespace: '{}'",
                url
            )));
        }

        let parsed = Url::parse(url)
            .map_err(|e| ShortenerError::InvalidUrl(format!("{}: {}", url, e)))?;

        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a host: {}",
                url
            )));
        }

        Ok(())
    }

    /// Builds a fresh record around the next candidate code.
    async fn candidate(&self, original_url: &str) -> Result<LinkRecord, ShortenerError> {
        let code: ShortCode = self.generator.generate().into();
        let id = self.registry.next_id().await?;
        Ok(LinkRecord::new(id, original_url, code, self.clock.now()))
    }
}

#[async_trait]
impl<R: Registry, G: Generator, C: Clock> Shortener for ShortenerService<R, G, C> {
    async fn shorten(&self, original_url: &str) -> Result<LinkRecord, ShortenerError> {
        Self::validate_url(original_url)?;

        if let Some(existing) = self.registry.find_by_url(original_url).await? {
            debug!(url = %original_url, code = %existing.short_code, "url already shortened");
            return Ok(existing);
        }

        let max_attempts = self.settings.max_attempts;
        for attempt in 1..=max_attempts {
            let record = self.candidate(original_url).await?;

            match self.registry.insert(record).await {
                Ok(record) => {
                    info!(
                        id = %record.id,
                        code = %record.short_code,
                        url = %record.original_url,
                        attempt,
                        "created short link"
                    );
                    return Ok(record);
                }
                Err(StorageError::Conflict(Conflict::Code(code))) => {
                    warn!(code = %code, attempt, "short code collision, retrying");
                }
                Err(StorageError::Conflict(Conflict::Url(_))) => {
                    // A concurrent shorten of the same url got there first.
                    if let Some(existing) = self.registry.find_by_url(original_url).await? {
                        debug!(
                            url = %original_url,
                            code = %existing.short_code,
                            "lost shorten race"
                        );
                        return Ok(existing);
                    }
                    trace!(url = %original_url, attempt, "conflicting record vanished, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(url = %original_url, max_attempts, "gave up looking for a free short code");
        Err(ShortenerError::ExhaustedRetries {
            attempts: max_attempts,
        })
    }

    async fn get(&self, id: LinkId) -> Result<LinkRecord, ShortenerError> {
        trace!(id = %id, "fetching link record");
        self.registry
            .find_by_id(id)
            .await?
            .ok_or_else(|| ShortenerError::NotFound(format!("id {id}")))
    }

    async fn list(&self) -> Result<Vec<LinkRecord>, ShortenerError> {
        Ok(self.registry.list_all().await?)
    }

    async fn delete(&self, id: LinkId) -> Result<LinkRecord, ShortenerError> {
        let record = self.registry.delete_by_id(id).await?;
        info!(id = %id, code = %record.short_code, "deleted short link");
        Ok(record)
    }
}
