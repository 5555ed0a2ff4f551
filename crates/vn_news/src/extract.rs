use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use url::Url;

use vn_core::types::ArticleDetails;

lazy_static! {
    static ref OG_IMAGE: Regex = Regex::new(
        r#"(?i)<meta\s+property=(?:"og:image"|'og:image')\s+content=(?:"([^"]*)"|'([^']*)')"#
    )
    .unwrap();
    static ref MARKDOWN_IMAGE: Regex = Regex::new(r"!\[[^\]]*\]\((https?://[^)]+)\)").unwrap();
    static ref IMG_TAG: Regex = Regex::new(r#"(?i)<img[^>]+src="([^"]+)""#).unwrap();

    // Tried in order; the first pattern whose capture parses as a date wins.
    static ref DATE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)published(?:\s+on)?:\s*(\w+\s+\d{1,2},?\s+\d{4})").unwrap(),
        Regex::new(r"(?i)date:\s*(\w+\s+\d{1,2},?\s+\d{4})").unwrap(),
        Regex::new(r"(?i)posted(?:\s+on)?:\s*(\w+\s+\d{1,2},?\s+\d{4})").unwrap(),
        Regex::new(r"(\d{1,2}\s+[A-Za-z]+\s+\d{4})").unwrap(),
        Regex::new(r"([A-Za-z]+\s+\d{1,2},?\s+\d{4})").unwrap(),
        Regex::new(r"(\d{4}-\d{2}-\d{2})").unwrap(),
    ];

    static ref AUTHOR_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\bby\s+([A-Za-z .]+?)(?:\s*,|\s+on\b|\s*\||\n|$)").unwrap(),
        Regex::new(r"(?i)\bauthors?\s*:\s*([A-Za-z .]+?)(?:\s*,|\s+on\b|\s*\||\n|$)").unwrap(),
        Regex::new(r"(?i)\bwritten\s+by\s+([A-Za-z .]+?)(?:\s*,|\s+on\b|\s*\||\n|$)").unwrap(),
        Regex::new(r"(?i)\bcontributor\s*:\s*([A-Za-z .]+?)(?:\s*,|\s+on\b|\s*\||\n|$)").unwrap(),
    ];
}

const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y-%m-%d",
];

fn parse_loose_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

/// Resolve a `/`-prefixed path against the scheme and host of `source_url`.
/// A source URL that fails to parse leaves the relative path as-is.
fn make_absolute(image_url: String, source_url: &str) -> String {
    if !image_url.starts_with('/') {
        return image_url;
    }
    match Url::parse(source_url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => format!("{}://{}{}", parsed.scheme(), host, image_url),
            None => image_url,
        },
        Err(e) => {
            debug!("could not resolve relative image against {}: {}", source_url, e);
            image_url
        }
    }
}

fn extract_image(content: &str, source_url: &str, html: Option<&str>) -> String {
    if let Some(html) = html {
        if let Some(caps) = OG_IMAGE.captures(html) {
            let found = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            if !found.is_empty() {
                return make_absolute(found, source_url);
            }
        }
    }
    if let Some(caps) = MARKDOWN_IMAGE.captures(content) {
        return caps[1].to_string();
    }
    if let Some(html) = html {
        if let Some(caps) = IMG_TAG.captures(html) {
            return make_absolute(caps[1].to_string(), source_url);
        }
    }
    String::new()
}

fn extract_summary(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    for paragraph in content.split("\n\n") {
        let length = paragraph.chars().count();
        if length > 100 && length < 500 && !paragraph.starts_with('#') {
            return paragraph.to_string();
        }
    }
    let head: String = content.chars().take(200).collect();
    head.replace('\n', " ") + "..."
}

fn extract_date(content: &str) -> Option<DateTime<Utc>> {
    for pattern in DATE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(content) {
            if let Some(date) = parse_loose_date(&caps[1]) {
                return Some(date);
            }
            debug!("unparseable date candidate: {}", &caps[1]);
        }
    }
    None
}

fn extract_author(content: &str) -> String {
    for pattern in AUTHOR_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(content) {
            let author = caps[1].trim();
            if !author.is_empty() {
                return author.to_string();
            }
        }
    }
    String::new()
}

/// Parse scraped page content into structured article fields. Every field has
/// a defined default, so malformed input never fails; a missing date is left
/// `None` for the caller to substitute.
pub fn extract_details(content: &str, source_url: &str, html: Option<&str>) -> ArticleDetails {
    ArticleDetails {
        summary: extract_summary(content),
        content: content.to_string(),
        image_url: extract_image(content, source_url, html),
        published_date: extract_date(content),
        author: extract_author(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn labeled_date_beats_bare_iso_date() {
        let content = "Conference recap.\n\npublished: January 5, 2024\n\nArchive entry 2024-03-10.";
        let details = extract_details(content, "https://example.com/a", None);
        let date = details.published_date.unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 5));
    }

    #[test]
    fn bare_date_formats_are_tried_in_order() {
        let details = extract_details("Updated 12 March 2024 by staff", "https://e.com", None);
        let date = details.published_date.unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 12));

        let details = extract_details("no date here at all", "https://e.com", None);
        assert!(details.published_date.is_none());
    }

    #[test]
    fn og_image_wins_over_markdown_image() {
        let html = r#"<meta property="og:image" content="https://cdn.example.com/og.jpg">"#;
        let content = "![alt](https://example.com/inline.png)\n\nBody.";
        let details = extract_details(content, "https://example.com/a", Some(html));
        assert_eq!(details.image_url, "https://cdn.example.com/og.jpg");

        let details = extract_details(content, "https://example.com/a", None);
        assert_eq!(details.image_url, "https://example.com/inline.png");
    }

    #[test]
    fn relative_image_resolves_against_source_host() {
        let html = r#"<meta property="og:image" content="/assets/hero.jpg">"#;
        let details = extract_details("Body.", "https://www.example.com/story", Some(html));
        assert_eq!(details.image_url, "https://www.example.com/assets/hero.jpg");

        // Unparseable source URL keeps the relative path.
        let details = extract_details("Body.", "not a url", Some(html));
        assert_eq!(details.image_url, "/assets/hero.jpg");
    }

    #[test]
    fn img_tag_is_the_last_image_fallback() {
        let html = r#"<p>hi</p><img class="x" src="/img/1.png" alt="">"#;
        let details = extract_details("Body.", "https://example.com/a", Some(html));
        assert_eq!(details.image_url, "https://example.com/img/1.png");
    }

    #[test]
    fn summary_prefers_a_medium_paragraph() {
        let good = "a".repeat(150);
        let content = format!("# Heading\n\nshort\n\n{}\n\ntail", good);
        let details = extract_details(&content, "https://e.com", None);
        assert_eq!(details.summary, good);
    }

    #[test]
    fn summary_falls_back_to_truncation() {
        let content = "short one\nshort two";
        let details = extract_details(content, "https://e.com", None);
        assert_eq!(details.summary, "short one short two...");

        // A single over-long paragraph is rejected by the window check.
        let long = "b".repeat(600);
        let details = extract_details(&long, "https://e.com", None);
        assert!(details.summary.ends_with("..."));
        assert_eq!(details.summary.chars().count(), 203);
    }

    #[test]
    fn author_patterns_match_in_order() {
        let details = extract_details("Story by Jane Doe, senior editor", "https://e.com", None);
        assert_eq!(details.author, "Jane Doe");

        let details = extract_details("Author: John Q. Public\nMore text", "https://e.com", None);
        assert_eq!(details.author, "John Q. Public");

        let details = extract_details("Contributor: Ana Ruiz", "https://e.com", None);
        assert_eq!(details.author, "Ana Ruiz");

        let details = extract_details("no byline here", "https://e.com", None);
        assert_eq!(details.author, "");
    }
}
