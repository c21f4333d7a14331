//! Core types and traits for the tinylink URL shortener.
//!
//! This crate provides the link record model, the registry traits and the
//! error types shared by the shortener service, the redirector service and
//! the storage backends.

pub mod clock;
pub mod error;
pub mod link;
pub mod registry;
pub mod short_url;
pub mod shortcode;
pub mod shortener;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
pub use error::{Conflict, CoreError, ShortenerError, StorageError};
pub use link::{LinkId, LinkRecord, LinkView};
pub use registry::{ReadRegistry, Registry};
pub use short_url::ShortUrlConfig;
pub use shortcode::ShortCode;
pub use shortener::Shortener;
