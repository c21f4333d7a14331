use crate::shortcode::ShortCode;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_PATH_PREFIX: &str = "s";

/// Where short URLs are served from.
///
/// A short URL is `{base_url}/{path_prefix}/{code}`; with an empty prefix it
/// is `{base_url}/{code}`.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Serialize, Deserialize)]
pub struct ShortUrlConfig {
    #[builder(default = DEFAULT_BASE_URL.to_string(), setter(into))]
    base_url: String,
    #[builder(default = DEFAULT_PATH_PREFIX.to_string(), setter(into))]
    path_prefix: String,
}

impl ShortUrlConfig {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Renders the short URL for `code`.
    pub fn render(&self, code: &ShortCode) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.path_prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("{base}/{code}")
        } else {
            format!("{base}/{prefix}/{code}")
        }
    }
}

impl Default for ShortUrlConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
