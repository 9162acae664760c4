use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PoliticalLean {
    Left,
    Center,
    Right,
}

impl std::fmt::Display for PoliticalLean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoliticalLean::Left => write!(f, "left"),
            PoliticalLean::Center => write!(f, "center"),
            PoliticalLean::Right => write!(f, "right"),
        }
    }
}

/// How close a source is to the underlying facts: primary sources are
/// original data or firsthand accounts, secondary is reporting on primary
/// material, tertiary is aggregation or commentary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceTier {
    Primary,
    Secondary,
    Tertiary,
}

impl std::fmt::Display for SourceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceTier::Primary => write!(f, "primary"),
            SourceTier::Secondary => write!(f, "secondary"),
            SourceTier::Tertiary => write!(f, "tertiary"),
        }
    }
}

/// Relationship between two sources, as asserted by the research provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Cites,
    DerivesFrom,
    Republishes,
    Contradicts,
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationKind::Cites => write!(f, "cites"),
            RelationKind::DerivesFrom => write!(f, "derives_from"),
            RelationKind::Republishes => write!(f, "republishes"),
            RelationKind::Contradicts => write!(f, "contradicts"),
        }
    }
}

// --- Payload types (provider wire shape) ---

/// A factual claim extracted from the analyzed content. Immutable once the
/// payload is validated; `source_chain` is the compact inline provenance
/// notation consumed by the chain parser, never interpreted elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Claim {
    pub claim_text: String,
    /// Provider confidence in [0, 1].
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_explanation: Option<String>,
    /// 1-based display position.
    pub position: u32,
    /// Inline chain notation, e.g. `"The Guardian (secondary) [https://…] → YouGov (primary)"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_chain: Option<String>,
    /// Fields the provider sent that we do not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An outlet backing one or more claims. Mutated only by the normalizer
/// (merge) and the URL verifier (`url_valid`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Source {
    pub outlet_name: String,
    /// May be empty — the provider sometimes returns placeholder records.
    #[serde(default)]
    pub url: String,
    /// Set by the URL verifier. `None` only before verification has run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_valid: Option<bool>,
    /// Untrusted provider string — formats vary too much to parse safely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub political_lean: Option<PoliticalLean>,
    pub source_type: SourceTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Links a claim to a source with a supporting excerpt. Indices are into the
/// payload's claim/source lists and must survive dedup remapping.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Citation {
    pub claim_index: usize,
    pub source_index: usize,
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<String>,
}

/// A typed source-to-source relationship.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SourceEdge {
    pub source_index: usize,
    pub target_index: usize,
    pub edge_type: RelationKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PoliticalDistribution {
    pub left: u32,
    pub center: u32,
    pub right: u32,
}

/// Scoring block produced by the provider. Percent scores are 0–100,
/// ratio scores are 0–1; the validator enforces both.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Metrics {
    pub factual_accuracy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factual_accuracy_explanation: Option<String>,
    pub clickbait_level: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clickbait_explanation: Option<String>,
    pub bias_level: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias_explanation: Option<String>,
    pub transparency_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency_explanation: Option<String>,
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_explanation: Option<String>,
    pub spectrum_coverage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub political_distribution: Option<PoliticalDistribution>,
}

/// The full analysis payload as returned by the research provider, before or
/// after pipeline processing. Unknown top-level fields ride along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisPayload {
    pub topic: String,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub claims: Vec<Claim>,
    pub sources: Vec<Source>,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub edges: Vec<SourceEdge>,
    pub metrics: Metrics,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// --- Derived types ---

/// One hop in a claim's "how we know this" trail, parsed from the inline
/// chain notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    pub name: String,
    pub source_type: SourceTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Article,
    Claim,
    Source,
}

/// A node in the provenance graph. Ids are stable strings derived from the
/// entity kind and canonical index (`article`, `claim-3`, `source-7`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub political_lean: Option<PoliticalLean>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceTier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub edge_type: RelationKind,
}

/// The terminal artifact: article → claims → sources plus source-to-source
/// relationship edges. Guaranteed internally consistent — every edge endpoint
/// names an emitted node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Records whether page content was fetched to enrich the analysis prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    pub content_extracted: bool,
    pub original_url: Option<String>,
    pub extraction_timestamp: DateTime<Utc>,
}
