use crate::command::{Command, USAGE};
use serde::Serialize;
use std::sync::Arc;
use tinylink_core::{LinkId, LinkView, ShortCode, ShortUrlConfig, Shortener};
use tinylink_redirector::Redirector;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// One line of console output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Link(LinkView),
    Links(Vec<LinkView>),
    Redirect {
        code: ShortCode,
        destination: String,
    },
    Help {
        commands: &'static [&'static str],
    },
    Error {
        error: String,
    },
}

impl Reply {
    fn error(error: impl ToString) -> Self {
        Self::Error {
            error: error.to_string(),
        }
    }
}

/// Dispatches console commands to the services.
#[derive(Clone)]
pub struct Console {
    shortener: Arc<dyn Shortener>,
    redirector: Arc<dyn Redirector>,
    short_urls: ShortUrlConfig,
}

impl Console {
    pub fn new(
        shortener: Arc<dyn Shortener>,
        redirector: Arc<dyn Redirector>,
        short_urls: ShortUrlConfig,
    ) -> Self {
        Self {
            shortener,
            redirector,
            short_urls,
        }
    }

    /// Reads commands line by line until `quit` or end of input.
    ///
    /// Failed commands produce an error reply; they never stop the loop.
    pub async fn run<I, O>(&self, input: I, mut output: O) -> std::io::Result<()>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let reply = match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command).await,
                Err(e) => Reply::error(e),
            };

            let mut bytes = serde_json::to_vec(&reply)?;
            bytes.push(b'\n');
            output.write_all(&bytes).await?;
            output.flush().await?;
        }
        Ok(())
    }

    pub async fn execute(&self, command: Command) -> Reply {
        debug!(?command, "executing console command");
        let reply = match command {
            Command::Shorten(url) => self
                .shortener
                .shorten(&url)
                .await
                .map(|record| Reply::Link(record.view(&self.short_urls)))
                .unwrap_or_else(Reply::error),
            Command::Resolve(code) => match ShortCode::new(code) {
                Ok(code) => match self.redirector.resolve(&code).await {
                    Ok(destination) => Reply::Redirect { code, destination },
                    Err(e) => Reply::error(e),
                },
                Err(e) => Reply::error(e),
            },
            Command::List => self
                .shortener
                .list()
                .await
                .map(|records| {
                    Reply::Links(records.iter().map(|r| r.view(&self.short_urls)).collect())
                })
                .unwrap_or_else(Reply::error),
            Command::Get(id) => match id.parse::<LinkId>() {
                Ok(id) => self
                    .shortener
                    .get(id)
                    .await
                    .map(|record| Reply::Link(record.view(&self.short_urls)))
                    .unwrap_or_else(Reply::error),
                Err(e) => Reply::error(e),
            },
            Command::Delete(id) => match id.parse::<LinkId>() {
                Ok(id) => self
                    .shortener
                    .delete(id)
                    .await
                    .map(|record| Reply::Link(record.view(&self.short_urls)))
                    .unwrap_or_else(Reply::error),
                Err(e) => Reply::error(e),
            },
            Command::Help | Command::Quit => Reply::Help { commands: USAGE },
        };

        if let Reply::Error { error } = &reply {
            warn!(error = %error, "console command failed");
        }
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tinylink_generator::SeqGenerator;
    use tinylink_redirector::RedirectorService;
    use tinylink_shortener::ShortenerService;
    use tinylink_storage::InMemoryRegistry;

    fn console() -> Console {
        let registry = InMemoryRegistry::new();
        Console::new(
            Arc::new(ShortenerService::new(
                registry.clone(),
                SeqGenerator::with_prefix("tl"),
            )),
            Arc::new(RedirectorService::new(registry)),
            ShortUrlConfig::builder().base_url("https://ti.ny").build(),
        )
    }

    async fn run(console: &Console, script: &str) -> Vec<Value> {
        let mut output = Vec::new();
        console.run(script.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn full_session() {
        let console = console();
        let replies = run(
            &console,
            "shorten https://example.com/a\n\
             resolve tl000000\n\
             shorten https://example.com/a\n\
             list\n\
             delete 1\n\
             resolve tl000000\n",
        )
        .await;

        assert_eq!(replies.len(), 6);
        assert_eq!(replies[0]["shortCode"], "tl000000");
        assert_eq!(replies[0]["shortUrl"], "https://ti.ny/s/tl000000");
        assert_eq!(replies[0]["clickCount"], 0);
        assert_eq!(replies[1]["destination"], "https://example.com/a");
        assert_eq!(replies[2]["id"], replies[0]["id"]);
        assert_eq!(replies[2]["clickCount"], 1);
        assert_eq!(replies[3].as_array().unwrap().len(), 1);
        assert_eq!(replies[4]["id"], 1);
        assert!(replies[5]["error"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn errors_do_not_stop_the_session() {
        let console = console();
        let replies = run(
            &console,
            "frobnicate\n\
             shorten not-a-url\n\
             get abc\n\
             resolve no!\n\
             \n\
             delete 42\n\
             list\n",
        )
        .await;

        assert_eq!(replies.len(), 6);
        for reply in &replies[..5] {
            assert!(reply["error"].is_string(), "{reply}");
        }
        assert_eq!(replies[5], Value::Array(vec![]));
    }

    #[tokio::test]
    async fn quit_stops_reading() {
        let console = console();
        let replies = run(&console, "help\nquit\nlist\n").await;

        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0]["commands"].as_array().unwrap().len(), USAGE.len());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let console = console();
        for url in ["https://one.com", "https://two.com"] {
            console.execute(Command::Shorten(url.to_string())).await;
        }

        let Reply::Links(links) = console.execute(Command::List).await else {
            panic!("expected a list reply");
        };
        assert_eq!(links.len(), 2);
        assert!(links[0].created_at >= links[1].created_at);
    }
}
