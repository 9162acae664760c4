//! Prompt construction for the research provider.
//!
//! The system prompt pins down the JSON contract the pipeline validates
//! against; the user prompt carries the query and, when the query was a URL,
//! the extracted page content.

use crate::util::truncate_to_char_boundary;
use crate::AnalysisRequest;

/// Max bytes of extracted page content to inline into the prompt.
const MAX_PAGE_CONTENT_BYTES: usize = 30_000;

pub const SYSTEM_PROMPT: &str = r#"You are a fact-checking and media analysis engine that provides multi-perspective source verification.

Trace every claim back to its original sources, evaluate credibility, detect bias and clickbait, and present findings with full transparency.

RULES:
- Extract claims ONLY about the content's main subject matter, never about the outlets themselves.
- For EACH claim, trace the information chain back to primary material.
- Classify every source: primary (original data, court documents, research, official statements), secondary (original reporting), tertiary (opinion, aggregation, commentary).
- Cover the political spectrum (left, center, right) where the topic is political.
- Include publish dates and URLs for every source.
- Score factual_accuracy, clickbait_level and bias_level on 0-100; transparency_score and confidence_score on 0-1.

REQUIRED JSON OUTPUT:
{
  "topic": "string - main subject",
  "headline": "string - exact article headline if a URL was provided, otherwise a descriptive headline",
  "summary": "string - 2-3 sentence summary of sourcing quality",
  "claims": [
    {
      "claim_text": "string",
      "confidence": 0.85,
      "confidence_explanation": "string",
      "position": 1,
      "source_chain": "Source Name (type) [url] → Source Name (type) [url]"
    }
  ],
  "sources": [
    {
      "outlet_name": "string",
      "url": "string",
      "publish_date": "2025-01-01T00:00:00Z",
      "political_lean": "left|center|right (optional)",
      "source_type": "primary|secondary|tertiary",
      "category": "news outlet|government agency|research institution|...",
      "image_url": "string (optional)"
    }
  ],
  "citations": [
    { "claim_index": 0, "source_index": 0, "excerpt": "string", "rationale": "string", "page_number": "string" }
  ],
  "edges": [
    { "source_index": 0, "target_index": 1, "edge_type": "cites|derives_from|republishes|contradicts" }
  ],
  "metrics": {
    "factual_accuracy": 85,
    "factual_accuracy_explanation": "string",
    "clickbait_level": 30,
    "clickbait_explanation": "string",
    "bias_level": 45,
    "bias_explanation": "string",
    "transparency_score": 0.9,
    "transparency_explanation": "string",
    "confidence_score": 0.85,
    "confidence_explanation": "string",
    "spectrum_coverage": "full|partial|limited|none",
    "political_distribution": { "left": 3, "center": 2, "right": 2 }
  }
}

Return ONLY valid JSON, no markdown code blocks. Every claim must have traceable sources."#;

pub fn build_user_prompt(request: &AnalysisRequest) -> String {
    match &request.page {
        Some(page) => {
            let body = truncate_to_char_boundary(&page.body, MAX_PAGE_CONTENT_BYTES);
            let headline = page.headline.as_deref().unwrap_or("(none extracted)");
            format!(
                "The user provided a URL: {url}\n\
                 The page content was fetched. Use it as the subject of analysis.\n\n\
                 Extracted headline: {headline}\n\n\
                 Page content:\n---\n{body}\n---",
                url = request.query,
            )
        }
        None if looks_like_url(&request.query) => format!(
            "The user provided a URL: {}\n\
             Page content could not be fetched — analyze from its metadata and \
             from independent coverage of the same story.",
            request.query
        ),
        None => format!(
            "The user provided a text/topic query. Search for the most relevant \
             recent articles and sources and analyze it.\n\nINPUT: {}",
            request.query
        ),
    }
}

/// Whether a query should be treated as a URL rather than a topic.
pub fn looks_like_url(query: &str) -> bool {
    let q = query.trim();
    q.starts_with("http://") || q.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageContext;

    #[test]
    fn url_detection() {
        assert!(looks_like_url("https://example.com/story"));
        assert!(looks_like_url("  http://example.com"));
        assert!(!looks_like_url("climate change policy"));
        assert!(!looks_like_url("ftp://example.com"));
    }

    #[test]
    fn topic_prompt_carries_query() {
        let req = AnalysisRequest {
            query: "local water quality".to_string(),
            page: None,
        };
        let prompt = build_user_prompt(&req);
        assert!(prompt.contains("local water quality"));
        assert!(prompt.contains("text/topic"));
    }

    #[test]
    fn url_prompt_without_page_degrades_to_metadata() {
        let req = AnalysisRequest {
            query: "https://example.com/a".to_string(),
            page: None,
        };
        let prompt = build_user_prompt(&req);
        assert!(prompt.contains("could not be fetched"));
    }

    #[test]
    fn page_content_is_inlined_and_bounded() {
        let req = AnalysisRequest {
            query: "https://example.com/a".to_string(),
            page: Some(PageContext {
                headline: Some("Big Story".to_string()),
                body: "x".repeat(100_000),
            }),
        };
        let prompt = build_user_prompt(&req);
        assert!(prompt.contains("Big Story"));
        assert!(prompt.len() < 40_000);
    }
}
