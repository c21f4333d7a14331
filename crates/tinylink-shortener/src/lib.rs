//! URL shortener service implementation.
//!
//! This crate provides [`ShortenerService`], which validates submitted URLs,
//! deduplicates them against the registry and allocates collision-free short
//! codes. Core types are re-exported from `tinylink_core`.

pub mod service;

pub use service::{ShortenerService, ShortenerSettings, DEFAULT_MAX_ATTEMPTS};
pub use tinylink_core::{LinkId, LinkRecord, Shortener, ShortenerError};
