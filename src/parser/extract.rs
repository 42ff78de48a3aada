use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use super::query::{child_attr, first_text};
use crate::error::ExtractionError;
use crate::feed::ProgrammeRecord;

pub const SITE_ORIGIN: &str = "http://www.bbc.co.uk";

static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(r#"span[property="name"]"#).unwrap());
static SUBTITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.subtitle").unwrap());
static SYNOPSIS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p.synopsis").unwrap());
static CHANNEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.small").unwrap());
static RELEASE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.release").unwrap());
static PID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/programmes/(?P<pid>[A-Za-z0-9]+)(?:[/?#]|$)").unwrap());

/// Build a record from one `programme--radio` node.
pub fn extract(programme: ElementRef<'_>) -> Result<ProgrammeRecord, ExtractionError> {
    let title = required(programme, &TITLE, "title")?;
    let subtitle = first_text(programme, &SUBTITLE);
    let synopsis = required(programme, &SYNOPSIS, "synopsis")?;
    let channel = required(programme, &CHANNEL, "channel")?;
    let release = first_text(programme, &RELEASE);

    let href = child_attr(programme, "a", "href")
        .ok_or(ExtractionError::MandatoryFieldMissing { field: "href" })?;
    let pid = pid_from_href(&href)?;

    Ok(ProgrammeRecord {
        title,
        subtitle,
        synopsis,
        channel,
        release,
        url: format!("{}{}", SITE_ORIGIN, href),
        pid,
    })
}

fn required(
    programme: ElementRef<'_>,
    selector: &Selector,
    field: &'static str,
) -> Result<String, ExtractionError> {
    first_text(programme, selector).ok_or(ExtractionError::MandatoryFieldMissing { field })
}

/// `/programmes/b00abc12/episodes/player` → `b00abc12`.
/// Other hrefs fall back to the third path segment, e.g. `/iplayer/episode/b00abc12`.
pub fn pid_from_href(href: &str) -> Result<String, ExtractionError> {
    PID_RE
        .captures(href)
        .map(|c| c["pid"].to_string())
        .or_else(|| third_segment(href))
        .ok_or_else(|| ExtractionError::MalformedHref { href: href.to_string() })
}

fn third_segment(href: &str) -> Option<String> {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    let segment = path.strip_prefix('/')?.split('/').nth(2)?;
    if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(segment.to_string())
    } else {
        None
    }
}
