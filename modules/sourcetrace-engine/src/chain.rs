//! Source-chain parsing.
//!
//! Claims carry a compact inline provenance trail:
//!
//! ```text
//! chain      := descriptor ("→" descriptor)*
//! descriptor := NAME "(" TYPE ")" ("[" URL "]")?   ; TYPE ∈ primary|secondary|tertiary
//!             | TEXT                               ; fallback production
//! ```
//!
//! The fallback production is deliberate: a segment that does not match the
//! typed form (including an unknown TYPE word) still becomes one hop, named
//! by the whole segment and defaulting to secondary. A malformed chain never
//! rejects the claim.

use regex::Regex;
use sourcetrace_common::{ChainLink, SourceTier};

const SEPARATOR: char = '→';

/// Parse a raw chain string into ordered links. Empty or whitespace-only
/// input yields an empty chain.
pub fn parse_chain(raw: &str) -> Vec<ChainLink> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let descriptor_re = Regex::new(
        r"^(?P<name>.+?)\s*\((?P<tier>[A-Za-z]+)\)\s*(?:\[(?P<url>[^\]]+)\])?$",
    )
    .expect("valid regex");

    raw.split(SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| parse_descriptor(segment, &descriptor_re))
        .collect()
}

fn parse_descriptor(segment: &str, descriptor_re: &Regex) -> ChainLink {
    if let Some(cap) = descriptor_re.captures(segment) {
        if let Some(tier) = parse_tier(&cap["tier"]) {
            return ChainLink {
                name: cap["name"].trim().to_string(),
                source_type: tier,
                url: cap.name("url").map(|m| m.as_str().trim().to_string()),
            };
        }
    }
    // Fallback production.
    ChainLink {
        name: segment.to_string(),
        source_type: SourceTier::Secondary,
        url: None,
    }
}

fn parse_tier(word: &str) -> Option<SourceTier> {
    match word.to_lowercase().as_str() {
        "primary" => Some(SourceTier::Primary),
        "secondary" => Some(SourceTier::Secondary),
        "tertiary" => Some(SourceTier::Tertiary),
        _ => None,
    }
}
