pub mod extract;
pub mod pagination;
pub mod programmes;
pub mod query;

use scraper::Html;

use crate::error::PageParseError;
use crate::feed::ProgrammeRecord;

/// What one index page contributes to the feed.
#[derive(Debug)]
pub struct ParsedPage {
    pub programmes: Vec<ProgrammeRecord>,
    pub is_last: bool,
}

/// Two independent passes over the same tree: termination check, then programme extraction.
pub fn process_page(body: &str) -> Result<ParsedPage, PageParseError> {
    let document = Html::parse_document(body);
    let is_last = pagination::is_last_page(&document);
    let programmes = programmes::parse_programmes(&document)?;
    Ok(ParsedPage { programmes, is_last })
}

#[cfg(test)]
pub(crate) fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
}
