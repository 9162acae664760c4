pub mod error;

pub use error::{PageExtractError, Result};

use std::time::Duration;

use regex::Regex;
use spider_transformations::transformation::content::{
    transform_content_input, ReturnFormat, TransformConfig, TransformInput,
};
use tracing::{info, warn};

/// Hard bound on the whole fetch-and-extract step. Extraction is an
/// auxiliary enrichment; the analysis proceeds without it.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Only scan the head of the document for title/OG tags.
const HEAD_LIMIT: usize = 64 * 1024;

const USER_AGENT: &str = "sourcetrace-fetch/0.1";

#[derive(Debug, Clone)]
pub struct PageContent {
    pub headline: Option<String>,
    pub body: String,
}

/// Fetches a page and extracts its headline and readable main content.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Fetch `url` and extract `{headline, body}`. Best-effort: any failure
    /// is reported as an error for the caller to degrade on, never retried.
    pub async fn fetch(&self, url: &str) -> Result<PageContent> {
        let parsed = url::Url::parse(url).map_err(|e| PageExtractError::BadUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(PageExtractError::BadUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PageExtractError::Status {
                status: status.as_u16(),
            });
        }
        let html = resp.text().await?;

        let headline = extract_headline(&html);

        let config = TransformConfig {
            readability: true,
            main_content: true,
            return_format: ReturnFormat::Markdown,
            filter_images: true,
            filter_svg: true,
            clean_html: true,
        };
        let input = TransformInput {
            url: Some(&parsed),
            content: html.as_bytes(),
            screenshot_bytes: None,
            encoding: None,
            selector_config: None,
            ignore_tags: None,
        };
        let body = transform_content_input(input, &config);

        if body.trim().is_empty() {
            warn!(url, "Empty content after Readability extraction");
            return Err(PageExtractError::EmptyContent);
        }

        info!(
            url,
            headline = headline.is_some(),
            body_len = body.len(),
            "Page content extracted"
        );

        Ok(PageContent {
            headline,
            body,
        })
    }
}

/// Pull a headline from `og:title` or the `<title>` tag.
fn extract_headline(html: &str) -> Option<String> {
    let mut limit = html.len().min(HEAD_LIMIT);
    while !html.is_char_boundary(limit) {
        limit -= 1;
    }
    let head = match html[..limit].find("</head>") {
        Some(end) => &html[..end],
        None => &html[..limit],
    };

    let og_re = Regex::new(
        r#"(?i)<meta\s+(?:[^>]*?\s)?(?:property|name)\s*=\s*["']og:title["'][^>]*?\scontent\s*=\s*["']([^"']*)["']"#,
    )
    .expect("valid regex");
    if let Some(cap) = og_re.captures(head) {
        let title = cap[1].trim().to_string();
        if !title.is_empty() {
            return Some(title);
        }
    }

    let title_re = Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").expect("valid regex");
    if let Some(cap) = title_re.captures(head) {
        let title = cap[1].trim().to_string();
        if !title.is_empty() {
            return Some(title);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn og_title_wins_over_title_tag() {
        let html = r#"<html><head>
            <meta property="og:title" content="OG Headline" />
            <title>Tag Headline</title>
        </head><body></body></html>"#;
        assert_eq!(extract_headline(html).as_deref(), Some("OG Headline"));
    }

    #[test]
    fn falls_back_to_title_tag() {
        let html = "<html><head><title> Tag Headline </title></head><body></body></html>";
        assert_eq!(extract_headline(html).as_deref(), Some("Tag Headline"));
    }

    #[test]
    fn no_headline_in_bare_page() {
        assert_eq!(extract_headline("<html><body>hi</body></html>"), None);
    }

    #[tokio::test]
    async fn rejects_non_http_scheme() {
        let fetcher = PageFetcher::new();
        let err = fetcher.fetch("ftp://example.com/x").await.unwrap_err();
        assert!(matches!(err, PageExtractError::BadUrl(_)));
    }
}
