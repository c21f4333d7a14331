//! Redirector service library.
//!
//! This crate provides a [`RedirectorService`] that resolves short codes to
//! their original URLs and counts every successful resolution.
//!
//! # Example
//!
//! ```rust
//! use tinylink_core::Shortener;
//! use tinylink_generator::RandomGenerator;
//! use tinylink_redirector::{Redirector, RedirectorService};
//! use tinylink_shortener::ShortenerService;
//! use tinylink_storage::InMemoryRegistry;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Both services share one registry
//! let registry = InMemoryRegistry::new();
//! let shortener = ShortenerService::new(registry.clone(), RandomGenerator::default());
//! let redirector = RedirectorService::new(registry);
//!
//! let link = shortener.shorten("https://example.com/a").await?;
//! let destination = redirector.resolve(&link.short_code).await?;
//! assert_eq!(destination, "https://example.com/a");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod redirector;
pub mod service;

pub use error::RedirectorError;
pub use redirector::Redirector;
pub use service::RedirectorService;

/// Result type for redirector operations.
pub type Result<T> = std::result::Result<T, RedirectorError>;
