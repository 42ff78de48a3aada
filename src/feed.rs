use std::io::Write;

use anyhow::Result;
use serde::Serialize;

/// One programme from an index page. Field order is the output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgrammeRecord {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub synopsis: String,
    pub channel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    pub url: String,
    pub pid: String,
}

/// Programmes from a single index page, in document order.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct PageResult {
    pub programmes: Vec<ProgrammeRecord>,
    #[serde(skip)]
    pub url: String,
    #[serde(skip)]
    pub is_last: bool,
}

/// Every page of a category, in fetch order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Feed {
    pub pages: Vec<PageResult>,
}

impl Feed {
    pub fn programme_count(&self) -> usize {
        self.pages.iter().map(|p| p.programmes.len()).sum()
    }
}

/// Serialize the feed as 4-space indented JSON followed by a newline.
pub fn write_json<W: Write>(feed: &Feed, mut out: W) -> Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    feed.serialize(&mut ser)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subtitle: Option<&str>, release: Option<&str>) -> ProgrammeRecord {
        ProgrammeRecord {
            title: "Test Show".into(),
            subtitle: subtitle.map(String::from),
            synopsis: "A show.".into(),
            channel: "BBC Radio 4".into(),
            release: release.map(String::from),
            url: "http://www.bbc.co.uk/programmes/b00abc12/episodes/player".into(),
            pid: "b00abc12".into(),
        }
    }

    fn render(feed: &Feed) -> String {
        let mut buf = Vec::new();
        write_json(feed, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn keys_follow_field_order() {
        let feed = Feed {
            pages: vec![PageResult {
                programmes: vec![record(Some("Episode 1"), Some("Today"))],
                url: String::new(),
                is_last: true,
            }],
        };
        let json = render(&feed);
        let keys = ["\"title\"", "\"subtitle\"", "\"synopsis\"", "\"channel\"", "\"release\"", "\"url\"", "\"pid\""];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let feed = Feed {
            pages: vec![PageResult {
                programmes: vec![record(None, None)],
                url: String::new(),
                is_last: true,
            }],
        };
        let json = render(&feed);
        assert!(!json.contains("subtitle"));
        assert!(!json.contains("release"));
        assert!(!json.contains("null"));
        assert!(!json.contains("is_last"));
    }

    #[test]
    fn nested_arrays_with_four_space_indent() {
        let feed = Feed {
            pages: vec![PageResult {
                programmes: vec![record(None, None)],
                url: String::new(),
                is_last: true,
            }],
        };
        let expected = r#"[
    [
        {
            "title": "Test Show",
            "synopsis": "A show.",
            "channel": "BBC Radio 4",
            "url": "http://www.bbc.co.uk/programmes/b00abc12/episodes/player",
            "pid": "b00abc12"
        }
    ]
]
"#;
        assert_eq!(render(&feed), expected);
    }

    #[test]
    fn non_ascii_stays_utf8() {
        let mut r = record(None, None);
        r.title = "Café Society".into();
        let feed = Feed {
            pages: vec![PageResult { programmes: vec![r], url: String::new(), is_last: true }],
        };
        assert!(render(&feed).contains("Café Society"));
        assert_eq!(feed.programme_count(), 1);
    }
}
