//! Provenance graph assembly.
//!
//! Node ids are derived from entity kind + canonical index, so identical
//! validated payloads always produce byte-identical node/edge sequences.
//! `url_valid` never influences topology; verification nondeterminism cannot
//! change the structural output.

use std::collections::HashSet;

use sourcetrace_common::{
    AnalysisPayload, GraphEdge, GraphNode, NodeKind, ProvenanceGraph, RelationKind,
};

pub const ARTICLE_NODE_ID: &str = "article";

/// Build the article → claims → sources graph from a validated payload.
///
/// Sources with an empty outlet name are placeholder records: they keep their
/// canonical index (so citation remapping stays stable) but get no node, and
/// any edge that would touch the missing node is skipped — the emitted graph
/// never contains a dangling edge.
pub fn assemble_graph(payload: &AnalysisPayload) -> ProvenanceGraph {
    let mut nodes = Vec::with_capacity(1 + payload.claims.len() + payload.sources.len());

    nodes.push(GraphNode {
        id: ARTICLE_NODE_ID.to_string(),
        name: payload.topic.clone(),
        kind: NodeKind::Article,
        political_lean: None,
        source_type: None,
    });

    for (index, _claim) in payload.claims.iter().enumerate() {
        nodes.push(GraphNode {
            id: format!("claim-{index}"),
            name: format!("Claim {}", index + 1),
            kind: NodeKind::Claim,
            political_lean: None,
            source_type: None,
        });
    }

    for (index, source) in payload.sources.iter().enumerate() {
        if source.outlet_name.trim().is_empty() {
            continue;
        }
        nodes.push(GraphNode {
            id: format!("source-{index}"),
            name: source.outlet_name.clone(),
            kind: NodeKind::Source,
            political_lean: source.political_lean,
            source_type: Some(source.source_type),
        });
    }

    let mut edges = Vec::new();
    {
        let emitted: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

        for index in 0..payload.claims.len() {
            edges.push(GraphEdge {
                source: ARTICLE_NODE_ID.to_string(),
                target: format!("claim-{index}"),
                edge_type: RelationKind::Cites,
            });
        }

        for citation in &payload.citations {
            let target = format!("source-{}", citation.source_index);
            if !emitted.contains(target.as_str()) {
                continue;
            }
            edges.push(GraphEdge {
                source: format!("claim-{}", citation.claim_index),
                target,
                edge_type: RelationKind::Cites,
            });
        }

        for edge in &payload.edges {
            let source = format!("source-{}", edge.source_index);
            let target = format!("source-{}", edge.target_index);
            if !emitted.contains(source.as_str()) || !emitted.contains(target.as_str()) {
                continue;
            }
            edges.push(GraphEdge {
                source,
                target,
                edge_type: edge.edge_type,
            });
        }
    }

    ProvenanceGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourcetrace_common::{
        Citation, Claim, Metrics, PoliticalLean, Source, SourceEdge, SourceTier,
    };

    fn claim(text: &str, position: u32) -> Claim {
        Claim {
            claim_text: text.to_string(),
            confidence: 0.8,
            confidence_explanation: None,
            position,
            source_chain: None,
            extra: serde_json::Map::new(),
        }
    }

    fn source(name: &str) -> Source {
        Source {
            outlet_name: name.to_string(),
            url: String::new(),
            url_valid: None,
            publish_date: None,
            political_lean: Some(PoliticalLean::Center),
            source_type: SourceTier::Secondary,
            category: None,
            image_url: None,
            extra: serde_json::Map::new(),
        }
    }

    fn metrics() -> Metrics {
        Metrics {
            factual_accuracy: 80.0,
            factual_accuracy_explanation: None,
            clickbait_level: 10.0,
            clickbait_explanation: None,
            bias_level: 20.0,
            bias_explanation: None,
            transparency_score: 0.8,
            transparency_explanation: None,
            confidence_score: 0.8,
            confidence_explanation: None,
            spectrum_coverage: "partial".to_string(),
            political_distribution: None,
        }
    }

    fn payload() -> AnalysisPayload {
        AnalysisPayload {
            topic: "Topic".to_string(),
            headline: "Headline".to_string(),
            summary: None,
            claims: vec![claim("a", 1), claim("b", 2)],
            sources: vec![source("AP"), source(""), source("Reuters")],
            citations: vec![
                Citation {
                    claim_index: 0,
                    source_index: 0,
                    excerpt: "q".to_string(),
                    rationale: None,
                    page_number: None,
                },
                Citation {
                    claim_index: 1,
                    source_index: 1, // placeholder source — no node
                    excerpt: "q".to_string(),
                    rationale: None,
                    page_number: None,
                },
            ],
            edges: vec![
                SourceEdge {
                    source_index: 0,
                    target_index: 2,
                    edge_type: RelationKind::Contradicts,
                },
                SourceEdge {
                    source_index: 1, // placeholder source — no node
                    target_index: 2,
                    edge_type: RelationKind::Cites,
                },
            ],
            metrics: metrics(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn article_node_is_always_first() {
        let graph = assemble_graph(&payload());
        assert_eq!(graph.nodes[0].id, "article");
        assert_eq!(graph.nodes[0].name, "Topic");
        assert_eq!(graph.nodes[0].kind, NodeKind::Article);
    }

    #[test]
    fn every_claim_gets_a_node_and_an_article_edge() {
        let graph = assemble_graph(&payload());
        let claim_ids: Vec<&str> = graph
            .nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Claim)
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(claim_ids, vec!["claim-0", "claim-1"]);
        for id in claim_ids {
            assert!(graph
                .edges
                .iter()
                .any(|e| e.source == "article" && e.target == id));
        }
    }

    #[test]
    fn empty_name_source_keeps_index_but_gets_no_node() {
        let graph = assemble_graph(&payload());
        let source_ids: Vec<&str> = graph
            .nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Source)
            .map(|n| n.id.as_str())
            .collect();
        // Index 1 is skipped, index 2 keeps its canonical id.
        assert_eq!(source_ids, vec!["source-0", "source-2"]);
    }

    #[test]
    fn edges_touching_excluded_nodes_are_skipped() {
        let graph = assemble_graph(&payload());
        assert!(!graph
            .edges
            .iter()
            .any(|e| e.source == "source-1" || e.target == "source-1"));
        // The valid citation and the valid source edge survive.
        assert!(graph
            .edges
            .iter()
            .any(|e| e.source == "claim-0" && e.target == "source-0"));
        assert!(graph
            .edges
            .iter()
            .any(|e| e.source == "source-0" && e.target == "source-2"));
    }

    #[test]
    fn no_dangling_edges() {
        let graph = assemble_graph(&payload());
        let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        for edge in &graph.edges {
            assert!(ids.contains(edge.source.as_str()), "dangling {}", edge.source);
            assert!(ids.contains(edge.target.as_str()), "dangling {}", edge.target);
        }
    }

    #[test]
    fn source_nodes_carry_lean_and_tier() {
        let graph = assemble_graph(&payload());
        let ap = graph.nodes.iter().find(|n| n.id == "source-0").unwrap();
        assert_eq!(ap.political_lean, Some(PoliticalLean::Center));
        assert_eq!(ap.source_type, Some(SourceTier::Secondary));
    }

    #[test]
    fn assembly_is_deterministic() {
        let p = payload();
        let a = serde_json::to_vec(&assemble_graph(&p)).unwrap();
        let b = serde_json::to_vec(&assemble_graph(&p)).unwrap();
        assert_eq!(a, b);
    }
}
