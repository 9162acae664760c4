//! Reference integrity — every surviving index must resolve.
//!
//! Citations and edges arrive with indices into the pre-dedup source list.
//! This pass remaps them through the normalizer's index map, drops anything
//! that cannot resolve, and drops self-edges (including ones the merge just
//! created). Drops are warnings, never errors: the provider is the untrusted
//! party, not the pipeline.

use std::collections::HashMap;

use sourcetrace_common::{AnalysisPayload, Warning};
use tracing::warn;

/// Remap and filter citations and edges in place. Returns one warning per
/// dropped item.
pub fn check_integrity(
    payload: &mut AnalysisPayload,
    index_map: &HashMap<usize, usize>,
) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let claim_count = payload.claims.len();

    let citations = std::mem::take(&mut payload.citations);
    for mut citation in citations {
        if citation.claim_index >= claim_count {
            warn!(
                claim_index = citation.claim_index,
                claim_count, "Dropping citation with out-of-range claim index"
            );
            warnings.push(Warning::CitationDropped {
                claim_index: citation.claim_index,
                source_index: citation.source_index,
                reason: format!("claim index out of range (claims: {claim_count})"),
            });
            continue;
        }
        match index_map.get(&citation.source_index) {
            Some(&canonical) => {
                citation.source_index = canonical;
                payload.citations.push(citation);
            }
            None => {
                warn!(
                    source_index = citation.source_index,
                    "Dropping citation with out-of-range source index"
                );
                warnings.push(Warning::CitationDropped {
                    claim_index: citation.claim_index,
                    source_index: citation.source_index,
                    reason: "source index out of range".to_string(),
                });
            }
        }
    }

    let edges = std::mem::take(&mut payload.edges);
    for mut edge in edges {
        let (from, to) = (edge.source_index, edge.target_index);
        let (Some(&src), Some(&dst)) = (index_map.get(&from), index_map.get(&to)) else {
            warn!(
                source_index = from,
                target_index = to,
                "Dropping edge with out-of-range endpoint"
            );
            warnings.push(Warning::EdgeDropped {
                source_index: from,
                target_index: to,
                reason: "endpoint index out of range".to_string(),
            });
            continue;
        };
        if src == dst {
            warn!(source_index = from, target_index = to, "Dropping self-edge");
            warnings.push(Warning::EdgeDropped {
                source_index: from,
                target_index: to,
                reason: "self-edge".to_string(),
            });
            continue;
        }
        edge.source_index = src;
        edge.target_index = dst;
        payload.edges.push(edge);
    }

    warnings
}
