use thiserror::Error;

/// Failure to retrieve an index page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Failure to turn one programme node into a record.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("mandatory field `{field}` missing from programme markup")]
    MandatoryFieldMissing { field: &'static str },
    #[error("programme href `{href}` has no programme id segment")]
    MalformedHref { href: String },
}

/// A single malformed programme aborts the whole page.
#[derive(Debug, Error)]
#[error("programme #{index} on page could not be extracted")]
pub struct PageParseError {
    pub index: usize,
    #[source]
    pub source: ExtractionError,
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to fetch page {page} ({url})")]
    Fetch {
        page: u32,
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("failed to parse page {page} ({url})")]
    Parse {
        page: u32,
        url: String,
        #[source]
        source: PageParseError,
    },
}
