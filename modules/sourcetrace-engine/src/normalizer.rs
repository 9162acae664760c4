//! Source dedup — canonical outlet identity.
//!
//! The provider routinely lists the same outlet twice under different
//! spellings ("BBC News" / "bbc news") or with and without a URL. Identity is
//! established here, once, by normalized name and URL keys; downstream code
//! must never re-derive it by fuzzy matching.

use std::collections::HashMap;

use sourcetrace_common::Source;
use tracing::info;

use crate::verify::is_well_formed_url;

/// Dedup result: canonical sources in first-occurrence order, plus the
/// old-index → canonical-index map every index-bearing consumer (citations,
/// edges) must be remapped through.
#[derive(Debug)]
pub struct NormalizedSources {
    pub sources: Vec<Source>,
    pub index_map: HashMap<usize, usize>,
}

/// Merge duplicate source records.
///
/// Two records collapse when either normalized key (name or URL) matches an
/// already-seen record; key registration is cumulative, so a record that
/// merges by name also contributes its URL key, making the merge transitive.
pub fn normalize_sources(raw: Vec<Source>) -> NormalizedSources {
    let raw_count = raw.len();
    let mut sources: Vec<Source> = Vec::new();
    let mut index_map: HashMap<usize, usize> = HashMap::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();
    let mut by_url: HashMap<String, usize> = HashMap::new();

    for (old_index, record) in raw.into_iter().enumerate() {
        let name_key = normalize_key(&record.outlet_name);
        let url_key = normalize_key(&record.url);

        // Empty keys never participate in matching — placeholder records with
        // no name must not all collapse into one.
        let existing = lookup(&by_name, &name_key).or_else(|| lookup(&by_url, &url_key));

        let canonical = match existing {
            Some(idx) => {
                merge_into(&mut sources[idx], record);
                idx
            }
            None => {
                sources.push(record);
                sources.len() - 1
            }
        };

        if !name_key.is_empty() {
            by_name.entry(name_key).or_insert(canonical);
        }
        if !url_key.is_empty() {
            by_url.entry(url_key).or_insert(canonical);
        }
        index_map.insert(old_index, canonical);
    }

    let merged = raw_count - sources.len();
    if merged > 0 {
        info!(raw = raw_count, canonical = sources.len(), merged, "Deduplicated sources");
    }

    NormalizedSources { sources, index_map }
}

fn lookup(map: &HashMap<String, usize>, key: &str) -> Option<usize> {
    if key.is_empty() {
        return None;
    }
    map.get(key).copied()
}

fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Merge policy: the canonical (first-seen) record wins, except where the
/// incoming record is strictly better — a well-formed URL when the canonical
/// has none, or a concrete value for a field the canonical left null.
fn merge_into(canonical: &mut Source, incoming: Source) {
    let incoming_url = incoming.url.trim();
    if !incoming_url.is_empty()
        && (canonical.url.trim().is_empty()
            || (!is_well_formed_url(&canonical.url) && is_well_formed_url(incoming_url)))
    {
        canonical.url = incoming.url;
    }
    if canonical.political_lean.is_none() {
        canonical.political_lean = incoming.political_lean;
    }
    if canonical.category.is_none() {
        canonical.category = incoming.category;
    }
    if canonical.publish_date.is_none() {
        canonical.publish_date = incoming.publish_date;
    }
    if canonical.image_url.is_none() {
        canonical.image_url = incoming.image_url;
    }
}
