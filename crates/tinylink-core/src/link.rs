use crate::error::CoreError;
use crate::short_url::ShortUrlConfig;
use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Opaque identifier of a link record.
///
/// Ids are handed out by the registry and never reused, even after the
/// record they named has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(u64);

impl LinkId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LinkId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|e| CoreError::InvalidLinkId(format!("'{s}': {e}")))
    }
}

/// A stored link record.
///
/// Everything except `click_count` is fixed when the record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: LinkId,
    /// The original URL that was shortened, exactly as submitted.
    pub original_url: String,
    pub short_code: ShortCode,
    /// Number of successful redirects through `short_code`.
    pub click_count: u64,
    pub created_at: Timestamp,
}

impl LinkRecord {
    /// Builds a fresh record with a zero click count.
    pub fn new(
        id: LinkId,
        original_url: impl Into<String>,
        short_code: ShortCode,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            original_url: original_url.into(),
            short_code,
            click_count: 0,
            created_at,
        }
    }

    /// Derives the public short URL of this record.
    pub fn short_url(&self, config: &ShortUrlConfig) -> String {
        config.render(&self.short_code)
    }

    /// Projects the record into its serialized form.
    pub fn view(&self, config: &ShortUrlConfig) -> LinkView {
        LinkView {
            id: self.id,
            original_url: self.original_url.clone(),
            short_code: self.short_code.clone(),
            short_url: self.short_url(config),
            click_count: self.click_count,
            created_at: self.created_at,
        }
    }
}

/// The outward-facing shape of a link record, including the derived short URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    pub id: LinkId,
    pub original_url: String,
    pub short_code: ShortCode,
    pub short_url: String,
    pub click_count: u64,
    pub created_at: Timestamp,
}
