use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::debug;

use super::extract;
use crate::error::PageParseError;
use crate::feed::ProgrammeRecord;

static PROGRAMME: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.programme--radio").unwrap());

/// Extract every radio programme on an index page, in document order.
pub fn parse_programmes(document: &Html) -> Result<Vec<ProgrammeRecord>, PageParseError> {
    let records = document
        .select(&PROGRAMME)
        .enumerate()
        .map(|(index, node)| extract::extract(node).map_err(|source| PageParseError { index, source }))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Parsed {} programmes", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::parser::fixture;

    #[test]
    fn keeps_document_order() {
        let html = Html::parse_document(&fixture("page_1"));
        let records = parse_programmes(&html).unwrap();
        let pids: Vec<&str> = records.iter().map(|r| r.pid.as_str()).collect();
        assert_eq!(pids, ["b0000001", "b0000002"]);
    }

    #[test]
    fn ignores_non_radio_programmes() {
        let html = Html::parse_document(&fixture("page_3"));
        let records = parse_programmes(&html).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pid, "b0000005");
    }

    #[test]
    fn one_bad_programme_fails_page() {
        let html = Html::parse_document(&fixture("malformed"));
        let err = parse_programmes(&html).unwrap_err();
        assert_eq!(err.index, 1);
        assert!(matches!(err.source, ExtractionError::MandatoryFieldMissing { field: "title" }));
    }

    #[test]
    fn page_without_programmes() {
        let html = Html::parse_document("<html><body><p>Nothing on</p></body></html>");
        assert!(parse_programmes(&html).unwrap().is_empty());
    }
}
