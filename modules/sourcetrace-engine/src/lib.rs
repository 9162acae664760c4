//! The sourcetrace pipeline: raw research-provider payload in, validated and
//! internally consistent provenance graph out.
//!
//! Stages run in dependency order: schema validation, source dedup, reference
//! integrity, then URL verification in parallel with chain parsing, and
//! finally graph assembly. Only validation can fail; everything downstream
//! degrades gracefully.

pub mod chain;
pub mod graph;
pub mod integrity;
pub mod normalizer;
pub mod pipeline;
pub mod validator;
pub mod verify;

pub use chain::parse_chain;
pub use graph::assemble_graph;
pub use integrity::check_integrity;
pub use normalizer::{normalize_sources, NormalizedSources};
pub use pipeline::{AnalysisReport, Pipeline};
pub use validator::validate_payload;
pub use verify::{is_well_formed_url, UrlVerifier, VerifyPolicy};
