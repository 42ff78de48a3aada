use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::error::CollectError;
use crate::feed::{Feed, PageResult};
use crate::fetch::PageFetcher;
use crate::parser;

const INDEX_BASE: &str = "http://www.bbc.co.uk/radio/programmes/genres";

/// Index URL for a page. Page 1 has no query string.
pub fn index_url(category: &str, page: u32) -> String {
    let url = format!("{}/{}/player/episodes", INDEX_BASE, category);
    if page > 1 {
        format!("{}?page={}", url, page)
    } else {
        url
    }
}

/// Walks a category's index pages until the last one.
pub struct Collector<'a> {
    fetcher: &'a dyn PageFetcher,
    progress: ProgressBar,
}

impl<'a> Collector<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher) -> Self {
        Self {
            fetcher,
            progress: ProgressBar::hidden(),
        }
    }

    /// Show a spinner on stderr while pages download.
    pub fn with_spinner(mut self) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
            pb.set_style(style);
        }
        self.progress = pb;
        self
    }

    /// Fetch every page of `category` in order. Any failure discards the whole feed.
    pub async fn collect(&self, category: &str) -> Result<Feed, CollectError> {
        let result = self.walk(category).await;
        self.progress.finish_and_clear();

        let feed = result?;
        info!(
            "Collected {} programmes from {} pages",
            feed.programme_count(),
            feed.pages.len()
        );
        Ok(feed)
    }

    async fn walk(&self, category: &str) -> Result<Feed, CollectError> {
        let mut feed = Feed::default();
        let mut page = 1u32;

        loop {
            let url = index_url(category, page);
            info!("Downloading page {}", page);
            self.progress.set_message(format!("page {} ({} programmes so far)", page, feed.programme_count()));

            let body = self
                .fetcher
                .fetch_page(&url)
                .await
                .map_err(|source| CollectError::Fetch { page, url: url.clone(), source })?;

            let parsed = parser::process_page(&body)
                .map_err(|source| CollectError::Parse { page, url: url.clone(), source })?;

            let is_last = parsed.is_last;
            feed.pages.push(PageResult {
                programmes: parsed.programmes,
                url,
                is_last,
            });
            self.progress.tick();

            if is_last {
                return Ok(feed);
            }
            page += 1;
        }
    }
}
