use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use research_client::{prompt, util, AnalysisRequest, PageContext};
use sourcetrace_common::{ExtractionMetadata, SourceTraceError};

use crate::AppState;

const MAX_QUERY_LEN: usize = 2048;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    query: String,
}

/// Validate and trim the incoming query. Returns a human-readable rejection
/// reason on failure.
fn validate_query(raw: &str) -> Result<String, &'static str> {
    let query = raw.trim();
    if query.is_empty() {
        return Err("query must not be empty");
    }
    if query.len() > MAX_QUERY_LEN {
        return Err("query too long (max 2048 characters)");
    }
    Ok(query.to_string())
}

fn error_json(status: StatusCode, error: &str, details: Option<String>) -> axum::response::Response {
    let mut body = serde_json::json!({ "error": error });
    if let Some(details) = details {
        body["details"] = serde_json::json!(details);
    }
    (status, Json(body)).into_response()
}

pub async fn api_analyze(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let query = match validate_query(&body.query) {
        Ok(q) => q,
        Err(reason) => return error_json(StatusCode::BAD_REQUEST, reason, None),
    };

    let analysis_id = Uuid::new_v4();
    let is_url = prompt::looks_like_url(&query);
    info!(%analysis_id, is_url, "Analysis requested");

    // Best-effort page extraction when the query is itself a URL. Failure
    // degrades to metadata-only analysis, recorded in extraction_metadata.
    let page = if is_url {
        match state.fetcher.fetch(&query).await {
            Ok(content) => Some(PageContext {
                headline: content.headline,
                body: content.body,
            }),
            Err(e) => {
                warn!(%analysis_id, error = %e, "Page extraction failed, continuing without content");
                None
            }
        }
    } else {
        None
    };
    let content_extracted = page.is_some();

    let request = AnalysisRequest {
        query: query.clone(),
        page,
    };
    let reply = match state.provider.analyze(&request).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(%analysis_id, error = %e, "Research provider call failed");
            return error_json(
                StatusCode::BAD_GATEWAY,
                "Research provider unavailable",
                Some(e.to_string()),
            );
        }
    };

    let raw_json = util::extract_json(&reply);
    match state.pipeline.run(raw_json.as_bytes(), state.verify_budget).await {
        Ok(mut report) => {
            report.extraction_metadata = Some(ExtractionMetadata {
                content_extracted,
                original_url: is_url.then(|| query.clone()),
                extraction_timestamp: Utc::now(),
            });
            info!(
                %analysis_id,
                claims = report.payload.claims.len(),
                sources = report.payload.sources.len(),
                warnings = report.warnings.len(),
                "Analysis completed"
            );
            Json(report).into_response()
        }
        Err(e @ (SourceTraceError::Parse(_) | SourceTraceError::Schema { .. })) => {
            warn!(%analysis_id, error = %e, "Research provider returned an invalid payload");
            error_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Research provider returned an invalid payload",
                Some(e.to_string()),
            )
        }
        Err(e) => {
            warn!(%analysis_id, error = %e, "Analysis pipeline failed");
            error_json(StatusCode::INTERNAL_SERVER_ERROR, "Analysis failed", None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_query() {
        assert!(validate_query("").is_err());
        assert!(validate_query("   ").is_err());
    }

    #[test]
    fn rejects_oversized_query() {
        let long = "q".repeat(MAX_QUERY_LEN + 1);
        assert!(validate_query(&long).is_err());
    }

    #[test]
    fn trims_and_accepts_normal_query() {
        assert_eq!(validate_query("  water quality  ").unwrap(), "water quality");
    }
}
