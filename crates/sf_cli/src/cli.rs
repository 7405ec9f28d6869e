use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use sf_client::{HttpArticleFetcher, ImageLoader, Logger};
use sf_core::config::{DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT};
use sf_core::{Article, ClientConfig};
use sf_store::{HomeFeed, PaginatedArticleStore};
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::browse::Browser;
use crate::render;

pub(crate) const LOAD_FAILED: &str = "Could not load the articles.";
pub(crate) const LOAD_MORE_FAILED: &str = "Could not load more articles.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    /// Accepts `30s`, `2m`, `1h 15m`, or a bare number of seconds.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        const TOO_LARGE: &str = "Duration too large";
        let mut total_seconds = 0u64;
        let mut current_number = String::new();

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
                continue;
            }
            if c.is_whitespace() {
                continue;
            }
            if current_number.is_empty() {
                return Err(format!("Expected a number before '{}'", c));
            }
            let unit = match c {
                's' => 1,
                'm' => 60,
                'h' => 3600,
                _ => return Err(format!("Invalid duration unit: {}", c)),
            };
            let num: u64 = current_number.parse().map_err(|_| TOO_LARGE.to_string())?;
            total_seconds = num
                .checked_mul(unit)
                .and_then(|secs| total_seconds.checked_add(secs))
                .ok_or_else(|| TOO_LARGE.to_string())?;
            current_number.clear();
        }

        if !current_number.is_empty() {
            let num: u64 = current_number.parse().map_err(|_| TOO_LARGE.to_string())?;
            total_seconds = total_seconds
                .checked_add(num)
                .ok_or_else(|| TOO_LARGE.to_string())?;
        }

        if total_seconds == 0 {
            return Err("Duration must be greater than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(name = "sfn", author, version, about = "Spaceflight news in the terminal", long_about = None)]
pub struct Cli {
    /// Articles endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    /// Articles per page
    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    pub limit: u32,
    /// Request timeout (e.g. 30s, 1m)
    #[arg(long, default_value = "30s")]
    pub timeout: HumanDuration,
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the most recent articles
    Latest {
        #[command(flatten)]
        list: ListArgs,
    },
    /// List articles matching a search term
    Search {
        term: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Page through articles interactively
    Browse {
        /// Start with this search instead of the latest articles
        #[arg(long)]
        search: Option<String>,
        /// Skip image lookups in the detail view
        #[arg(long)]
        no_images: bool,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Number of pages to fetch
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
    /// Print the articles as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new()
            .with_base_url(self.base_url.clone())
            .with_page_limit(self.limit)
            .with_timeout(self.timeout.0)
    }
}

pub async fn run(cli: Cli, logger: Logger) -> anyhow::Result<()> {
    let fetcher = HttpArticleFetcher::new(cli.client_config()).context("Failed to create HTTP client")?;
    let config = fetcher.config();
    logger.debug(&format!(
        "Fetching from {} ({} per page, timeout {:?})",
        config.base_url, config.page_limit, config.timeout
    ));
    let images = ImageLoader::new(fetcher.client().clone());
    let feed = HomeFeed::new(PaginatedArticleStore::new(Arc::new(fetcher)));

    match cli.command {
        Commands::Latest { list } => {
            let logger = logger.with_prefix("[latest]".to_string());
            let articles = collect_pages(&feed, None, list.pages, &logger).await?;
            print_articles(&articles, list.json)
        }
        Commands::Search { term, list } => {
            let logger = logger.with_prefix(format!("[search:{}]", term));
            let articles = collect_pages(&feed, Some(term), list.pages, &logger).await?;
            print_articles(&articles, list.json)
        }
        Commands::Browse { search, no_images } => {
            let images = (!no_images).then_some(images);
            let logger = logger.with_prefix("[browse]".to_string());
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut browser = Browser::new(feed, images, logger, input, std::io::stdout());
            browser.run(search).await?;
            Ok(())
        }
    }
}

/// Initial load plus up to `pages - 1` load-mores. A failed load-more keeps
/// what was already fetched.
async fn collect_pages(
    feed: &HomeFeed,
    search: Option<String>,
    pages: u32,
    logger: &Logger,
) -> anyhow::Result<Vec<Article>> {
    let first = match search {
        Some(term) => feed.search(term).await,
        None => feed.load_initial().await,
    };
    let mut articles = match first {
        Ok(articles) => articles,
        Err(e) => {
            logger.report("initial load", &e);
            bail!(LOAD_FAILED);
        }
    };

    for _ in 1..pages.max(1) {
        match feed.load_more().await {
            Ok(Some(more)) => articles.extend(more),
            Ok(None) => break,
            Err(e) => {
                logger.report("load more", &e);
                eprintln!("{}", LOAD_MORE_FAILED);
                break;
            }
        }
    }

    logger.info(&format!("📰 {} articles", articles.len()));
    Ok(articles)
}

fn print_articles(articles: &[Article], json: bool) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, articles)?;
        writeln!(out)?;
    } else {
        for (index, article) in articles.iter().enumerate() {
            writeln!(out, "{}", render::article_line(index, article))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_human_duration() {
        assert_eq!("30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(30));
        assert_eq!("45".parse::<HumanDuration>().unwrap().0, Duration::from_secs(45));
        assert_eq!("1m30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert_eq!("1h".parse::<HumanDuration>().unwrap().0, Duration::from_secs(3600));
        assert!("".parse::<HumanDuration>().is_err());
        assert!("s".parse::<HumanDuration>().is_err());
        assert!("10x".parse::<HumanDuration>().is_err());
        assert_eq!("1m 30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert_eq!(" 2h ".parse::<HumanDuration>().unwrap().0, Duration::from_secs(7200));
    }

    #[test]
    fn test_human_duration_rejects_zero_and_overflow() {
        assert!("0".parse::<HumanDuration>().is_err());
        assert!("0s 0m".parse::<HumanDuration>().is_err());
        assert_eq!(
            "6000000000000000h".parse::<HumanDuration>(),
            Err("Duration too large".to_string())
        );
        assert_eq!(
            "18446744073709551615s 1s".parse::<HumanDuration>(),
            Err("Duration too large".to_string())
        );
        assert_eq!(
            "99999999999999999999".parse::<HumanDuration>(),
            Err("Duration too large".to_string())
        );
        assert!(Cli::try_parse_from(["sfn", "--timeout", "0", "latest"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["sfn", "latest"]).unwrap();
        let config = cli.client_config();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(config.timeout, Duration::from_secs(30));
        match cli.command {
            Commands::Latest { list } => {
                assert_eq!(list.pages, 1);
                assert!(!list.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_with_overrides() {
        let cli = Cli::try_parse_from([
            "sfn",
            "--base-url",
            "http://localhost:9000/v4/articles/",
            "--limit",
            "5",
            "--timeout",
            "5s",
            "search",
            "mars",
            "--pages",
            "3",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.client_config().page_limit, 5);
        assert_eq!(cli.timeout.0, Duration::from_secs(5));
        match cli.command {
            Commands::Search { term, list } => {
                assert_eq!(term, "mars");
                assert_eq!(list.pages, 3);
                assert!(list.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bad_timeout_rejected() {
        assert!(Cli::try_parse_from(["sfn", "--timeout", "soon", "latest"]).is_err());
    }
}
