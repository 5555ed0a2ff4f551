use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use tokio::time::timeout;

use vn_core::{Error, Result};

/// Raw article page content: a markdown-ish text rendering plus the original
/// HTML when available.
#[derive(Debug, Clone, Default)]
pub struct ScrapedPage {
    pub content: String,
    pub html: Option<String>,
}

/// Fetches one article page. Implementations must bound their own wait so a
/// single slow source cannot stall a whole acquisition batch.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<ScrapedPage>;
}

/// Plain HTTP fetcher: GET the page, flatten headings and paragraphs into
/// blank-line-separated text.
pub struct HttpPageFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }
}

/// Flatten an HTML document into text the extractor can work on: the first
/// heading as a `#` title line, then paragraph texts separated by blank
/// lines.
pub fn page_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut blocks = Vec::new();

    if let Some(heading) = document
        .select(&Selector::parse("h1").unwrap())
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
    {
        blocks.push(format!("# {}", heading));
    }

    for paragraph in document.select(&Selector::parse("p").unwrap()) {
        let text = paragraph.text().collect::<String>().trim().to_string();
        if !text.is_empty() {
            blocks.push(text);
        }
    }

    blocks.join("\n\n")
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<ScrapedPage> {
        let response = timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| Error::Extraction(format!("Timed out fetching {}", url)))??;
        let html = timeout(self.timeout, response.text())
            .await
            .map_err(|_| Error::Extraction(format!("Timed out reading {}", url)))??;

        let content = page_to_text(&html);
        Ok(ScrapedPage {
            content,
            html: Some(html),
        })
    }
}
