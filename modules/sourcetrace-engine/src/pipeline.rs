//! Pipeline orchestration.
//!
//! Validation, dedup, and integrity run synchronously; URL verification and
//! chain parsing are independent of each other and run concurrently; graph
//! assembly runs last on the settled payload. Only validation can abort.

use std::time::Duration;

use serde::Serialize;
use sourcetrace_common::{
    AnalysisPayload, ChainLink, ExtractionMetadata, ProvenanceGraph, SourceTraceError, Warning,
};
use tracing::info;

use crate::chain::parse_chain;
use crate::graph::assemble_graph;
use crate::integrity::check_integrity;
use crate::normalizer::normalize_sources;
use crate::validator::validate_payload;
use crate::verify::UrlVerifier;

/// The terminal result: the settled payload, its provenance graph, per-claim
/// chains (parallel to `claims`), and the integrity warnings collected along
/// the way.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub payload: AnalysisPayload,
    pub graph: ProvenanceGraph,
    pub claim_chains: Vec<Vec<ChainLink>>,
    pub warnings: Vec<Warning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_metadata: Option<ExtractionMetadata>,
}

pub struct Pipeline {
    verifier: UrlVerifier,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_verifier(UrlVerifier::new())
    }

    pub fn with_verifier(verifier: UrlVerifier) -> Self {
        Self { verifier }
    }

    /// Run the full pipeline over a raw provider payload. `budget` bounds the
    /// URL verification phase; everything else is synchronous transformation.
    pub async fn run(
        &self,
        raw: &[u8],
        budget: Duration,
    ) -> Result<AnalysisReport, SourceTraceError> {
        let mut payload = validate_payload(raw)?;
        let raw_source_count = payload.sources.len();

        let normalized = normalize_sources(std::mem::take(&mut payload.sources));
        payload.sources = normalized.sources;

        let warnings = check_integrity(&mut payload, &normalized.index_map);

        // Verification writes url_valid, chain parsing reads claims — disjoint
        // borrows, so both phases run concurrently.
        let claim_chains = {
            let AnalysisPayload {
                sources, claims, ..
            } = &mut payload;
            let (_, chains) = tokio::join!(self.verifier.verify_all(sources, budget), async {
                claims
                    .iter()
                    .map(|c| parse_chain(c.source_chain.as_deref().unwrap_or("")))
                    .collect::<Vec<_>>()
            });
            chains
        };

        let graph = assemble_graph(&payload);

        info!(
            claims = payload.claims.len(),
            raw_sources = raw_source_count,
            canonical_sources = payload.sources.len(),
            graph_nodes = graph.nodes.len(),
            graph_edges = graph.edges.len(),
            warnings = warnings.len(),
            "Pipeline completed"
        );

        Ok(AnalysisReport {
            payload,
            graph,
            claim_chains,
            warnings,
            extraction_metadata: None,
        })
    }
}
