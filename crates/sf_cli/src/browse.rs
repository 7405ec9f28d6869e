use sf_client::{ImageLoader, Logger};
use sf_core::Result;
use sf_store::HomeFeed;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::cli::{LOAD_FAILED, LOAD_MORE_FAILED};
use crate::render;

const HELP: &str = "Enter/m: more   <n>: open article n   s <text>: search   r: refresh   q: quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseInput {
    More,
    Open(usize),
    Search(String),
    Refresh,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_input(line: &str) -> BrowseInput {
    let line = line.trim();
    match line {
        "" | "m" | "more" => return BrowseInput::More,
        "r" | "refresh" => return BrowseInput::Refresh,
        "?" | "h" | "help" => return BrowseInput::Help,
        "q" | "quit" | "exit" => return BrowseInput::Quit,
        _ => {}
    }

    if let Some(term) = line.strip_prefix("s ").or_else(|| line.strip_prefix("search ")) {
        return BrowseInput::Search(term.trim().to_string());
    }
    match line.parse::<usize>() {
        Ok(n) if n > 0 => BrowseInput::Open(n - 1),
        _ => BrowseInput::Unknown(line.to_string()),
    }
}

/// Interactive pager over a [`HomeFeed`]: reads commands from `R`, writes the
/// list and detail views to `W`.
pub struct Browser<R, W> {
    feed: HomeFeed,
    images: Option<ImageLoader>,
    logger: Logger,
    input: Lines<R>,
    out: W,
    shown: usize,
}

impl<R, W> Browser<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(feed: HomeFeed, images: Option<ImageLoader>, logger: Logger, input: R, out: W) -> Self {
        Self {
            feed,
            images,
            logger,
            input: input.lines(),
            out,
            shown: 0,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn run(&mut self, search: Option<String>) -> Result<()> {
        if !self.reload(search).await? {
            return Ok(());
        }
        writeln!(self.out, "{}", HELP)?;

        loop {
            self.prompt("> ")?;
            let line = match self.input.next_line().await? {
                Some(line) => line,
                None => break,
            };

            match parse_input(&line) {
                BrowseInput::More => self.more().await?,
                BrowseInput::Open(row) => self.open(row).await?,
                BrowseInput::Search(term) => {
                    self.reload(Some(term)).await?;
                }
                BrowseInput::Refresh => {
                    let term = self.feed.store().search_term().await;
                    self.reload(term).await?;
                }
                BrowseInput::Help => writeln!(self.out, "{}", HELP)?,
                BrowseInput::Quit => break,
                BrowseInput::Unknown(input) => writeln!(self.out, "Unknown command: {} (? for help)", input)?,
            }
        }

        Ok(())
    }

    /// Starts a new result set. Returns false when it failed and the user
    /// declined to retry.
    async fn reload(&mut self, search: Option<String>) -> Result<bool> {
        loop {
            let result = match &search {
                Some(term) => self.feed.search(term.clone()).await,
                None => self.feed.load_initial().await,
            };

            match result {
                Ok(_) => {
                    self.shown = 0;
                    self.print_pending().await?;
                    return Ok(true);
                }
                Err(e) => {
                    self.logger.report("initial load", &e);
                    if !self.confirm_retry(LOAD_FAILED).await? {
                        return Ok(false);
                    }
                }
            }
        }
    }

    async fn more(&mut self) -> Result<()> {
        if self.shown < self.feed.store().len().await {
            return self.print_pending().await;
        }

        loop {
            match self.feed.load_more().await {
                Ok(Some(_)) => return self.print_pending().await,
                Ok(None) => {
                    self.logger.debug("Load more requested with no next page");
                    writeln!(self.out, "No more articles.")?;
                    return Ok(());
                }
                Err(e) => {
                    self.logger.report("load more", &e);
                    if !self.confirm_retry(LOAD_MORE_FAILED).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    async fn open(&mut self, row: usize) -> Result<()> {
        let detail = match self.feed.select(row).await {
            Some(detail) => detail,
            None => {
                writeln!(self.out, "No article #{}", row + 1)?;
                return Ok(());
            }
        };

        let image_bytes = match (&self.images, detail.item().image_url.as_deref()) {
            (Some(loader), Some(url)) => loader.load(url).await.map(|data| data.len()),
            _ => None,
        };
        writeln!(self.out, "\n{}\n", render::detail_block(&detail, image_bytes))?;

        // Reading close to the end of the list fetches the next page in the background.
        match self.feed.row_displayed(row).await {
            Ok(Some(more)) if !more.is_empty() => {
                writeln!(self.out, "({} more loaded, press Enter to show them)", more.len())?;
            }
            Ok(_) => {}
            Err(e) => {
                self.logger.report("load more", &e);
                if self.confirm_retry(LOAD_MORE_FAILED).await? {
                    self.more().await?;
                }
            }
        }
        Ok(())
    }

    /// Listing rows does not count as displaying them; only `open` drives the
    /// near-end prefetch.
    async fn print_pending(&mut self) -> Result<()> {
        let items = self.feed.items().await;
        for (index, article) in items.iter().enumerate().skip(self.shown) {
            writeln!(self.out, "{}", render::article_line(index, article))?;
        }
        self.shown = items.len();

        if items.is_empty() {
            writeln!(self.out, "No articles found.")?;
        } else if !self.feed.store().has_more().await {
            writeln!(self.out, "(end of results)")?;
        }
        Ok(())
    }

    async fn confirm_retry(&mut self, message: &str) -> Result<bool> {
        writeln!(self.out, "{}", message)?;
        self.prompt("Retry? [y/N] ")?;
        let answer = self.input.next_line().await?.unwrap_or_default();
        let retry = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
        if !retry {
            self.logger.warn(&format!("Retry declined: {}", message));
        }
        Ok(retry)
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }
}
