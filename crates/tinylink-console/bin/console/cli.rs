use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use tinylink_core::short_url::{DEFAULT_BASE_URL, DEFAULT_PATH_PREFIX};
use tinylink_generator::DEFAULT_CODE_LENGTH;
use tinylink_shortener::DEFAULT_MAX_ATTEMPTS;

pub const BASE_URL_ENV: &str = "TINYLINK_BASE_URL";
pub const PATH_PREFIX_ENV: &str = "TINYLINK_PATH_PREFIX";
pub const CODE_LENGTH_ENV: &str = "TINYLINK_CODE_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "TINYLINK_MAX_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "TINYLINK_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Reads commands from stdin and prints one JSON line per command.
#[derive(Debug, Parser)]
#[command(name = "tinylink")]
pub struct CLI {
    /// Public address short URLs are served from.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Path segment between the base address and the short code.
    #[arg(long, env = PATH_PREFIX_ENV, default_value = DEFAULT_PATH_PREFIX)]
    pub path_prefix: String,

    #[arg(
        long,
        env = CODE_LENGTH_ENV,
        default_value_t = DEFAULT_CODE_LENGTH as u8,
        value_parser = clap::value_parser!(u8).range(3..=32),
    )]
    pub code_length: u8,

    /// Candidate codes to try before giving up on a shorten request.
    #[arg(
        long,
        env = MAX_ATTEMPTS_ENV,
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    pub max_attempts: u32,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,
}
