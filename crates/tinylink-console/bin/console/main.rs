mod cli;

use crate::cli::{LogFormat, CLI};
use clap::Parser;
use std::sync::Arc;
use tinylink_console::Console;
use tinylink_core::ShortUrlConfig;
use tinylink_generator::{GeneratorSettings, RandomGenerator};
use tinylink_redirector::RedirectorService;
use tinylink_shortener::{ShortenerService, ShortenerSettings};
use tinylink_storage::InMemoryRegistry;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::try_parse()?;
    init_tracing(config.log_format);

    info!(
        base_url = %config.base_url,
        path_prefix = %config.path_prefix,
        code_length = config.code_length,
        max_attempts = config.max_attempts,
        "starting tinylink console"
    );

    let registry = InMemoryRegistry::new();
    let generator = RandomGenerator::new(
        GeneratorSettings::builder()
            .length(usize::from(config.code_length))
            .build(),
    )?;
    let shortener = ShortenerService::with_settings(
        registry.clone(),
        generator,
        ShortenerSettings::builder()
            .max_attempts(config.max_attempts)
            .build(),
    );
    let redirector = RedirectorService::new(registry);
    let short_urls = ShortUrlConfig::builder()
        .base_url(config.base_url)
        .path_prefix(config.path_prefix)
        .build();

    let console = Console::new(Arc::new(shortener), Arc::new(redirector), short_urls);
    console
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    info!("stdin closed, shutting down");
    Ok(())
}

/// Logs go to stderr so stdout carries nothing but replies.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
