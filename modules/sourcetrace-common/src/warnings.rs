use serde::{Deserialize, Serialize};

/// Non-fatal integrity findings. Dropped items are invisible to the end
/// consumer except through these, so each variant carries enough of the
/// offending record to be actionable in logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    CitationDropped {
        claim_index: usize,
        source_index: usize,
        reason: String,
    },
    EdgeDropped {
        source_index: usize,
        target_index: usize,
        reason: String,
    },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::CitationDropped {
                claim_index,
                source_index,
                reason,
            } => write!(
                f,
                "citation claim={claim_index} source={source_index} dropped: {reason}"
            ),
            Warning::EdgeDropped {
                source_index,
                target_index,
                reason,
            } => write!(
                f,
                "edge {source_index}->{target_index} dropped: {reason}"
            ),
        }
    }
}
