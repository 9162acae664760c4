//! Schema validation — the trust boundary for provider output.
//!
//! All shape and bounds checks live here, not scattered through consumers.
//! The first violation aborts the pipeline; no partial graph is built from
//! structurally broken input.

use sourcetrace_common::{AnalysisPayload, SourceTraceError};

/// Parse and validate a raw payload.
///
/// JSON parse failures surface as [`SourceTraceError::Parse`], shape and
/// bounds violations as [`SourceTraceError::Schema`]. Unknown fields are
/// carried through untouched in the types' `extra` maps.
pub fn validate_payload(raw: &[u8]) -> Result<AnalysisPayload, SourceTraceError> {
    let value: serde_json::Value = serde_json::from_slice(raw)?;
    let payload: AnalysisPayload =
        serde_json::from_value(value).map_err(|e| SourceTraceError::Schema {
            field: "payload".to_string(),
            reason: e.to_string(),
        })?;
    check_bounds(&payload)?;
    Ok(payload)
}

fn check_bounds(payload: &AnalysisPayload) -> Result<(), SourceTraceError> {
    for (i, claim) in payload.claims.iter().enumerate() {
        if !(0.0..=1.0).contains(&claim.confidence) {
            return Err(SourceTraceError::schema(
                format!("claims[{i}].confidence"),
                format!("must be in [0, 1], got {}", claim.confidence),
            ));
        }
        if claim.position < 1 {
            return Err(SourceTraceError::schema(
                format!("claims[{i}].position"),
                "must be >= 1",
            ));
        }
    }

    let m = &payload.metrics;
    check_range("metrics.factual_accuracy", m.factual_accuracy, 100.0)?;
    check_range("metrics.clickbait_level", m.clickbait_level, 100.0)?;
    check_range("metrics.bias_level", m.bias_level, 100.0)?;
    check_range("metrics.transparency_score", m.transparency_score, 1.0)?;
    check_range("metrics.confidence_score", m.confidence_score, 1.0)?;

    Ok(())
}

fn check_range(field: &str, value: f64, max: f64) -> Result<(), SourceTraceError> {
    if !(0.0..=max).contains(&value) {
        return Err(SourceTraceError::schema(
            field,
            format!("must be in [0, {max}], got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_payload() -> serde_json::Value {
        serde_json::json!({
            "topic": "Water quality",
            "headline": "City water tests show elevated lead",
            "claims": [
                { "claim_text": "Lead levels exceeded limits", "confidence": 0.9, "position": 1 }
            ],
            "sources": [
                { "outlet_name": "City Lab Report", "url": "https://city.example.gov/report", "source_type": "primary" }
            ],
            "citations": [],
            "edges": [],
            "metrics": {
                "factual_accuracy": 90,
                "clickbait_level": 10,
                "bias_level": 20,
                "transparency_score": 0.9,
                "confidence_score": 0.85,
                "spectrum_coverage": "partial"
            }
        })
    }

    #[test]
    fn accepts_minimal_payload() {
        let raw = serde_json::to_vec(&minimal_payload()).unwrap();
        let payload = validate_payload(&raw).unwrap();
        assert_eq!(payload.claims.len(), 1);
        assert_eq!(payload.sources.len(), 1);
    }

    #[test]
    fn rejects_invalid_json() {
        let err = validate_payload(b"not json").unwrap_err();
        assert!(matches!(err, SourceTraceError::Parse(_)));
    }

    #[test]
    fn rejects_missing_required_field() {
        let mut v = minimal_payload();
        v.as_object_mut().unwrap().remove("metrics");
        let err = validate_payload(&serde_json::to_vec(&v).unwrap()).unwrap_err();
        assert!(matches!(err, SourceTraceError::Schema { .. }));
    }

    #[test]
    fn rejects_confidence_out_of_bounds() {
        let mut v = minimal_payload();
        v["claims"][0]["confidence"] = serde_json::json!(1.5);
        let err = validate_payload(&serde_json::to_vec(&v).unwrap()).unwrap_err();
        match err {
            SourceTraceError::Schema { field, .. } => {
                assert_eq!(field, "claims[0].confidence");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_zero_position() {
        let mut v = minimal_payload();
        v["claims"][0]["position"] = serde_json::json!(0);
        let err = validate_payload(&serde_json::to_vec(&v).unwrap()).unwrap_err();
        assert!(matches!(err, SourceTraceError::Schema { .. }));
    }

    #[test]
    fn rejects_metric_over_range() {
        let mut v = minimal_payload();
        v["metrics"]["factual_accuracy"] = serde_json::json!(120);
        let err = validate_payload(&serde_json::to_vec(&v).unwrap()).unwrap_err();
        match err {
            SourceTraceError::Schema { field, .. } => {
                assert_eq!(field, "metrics.factual_accuracy");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_wrong_enum_value() {
        let mut v = minimal_payload();
        v["sources"][0]["source_type"] = serde_json::json!("quaternary");
        let err = validate_payload(&serde_json::to_vec(&v).unwrap()).unwrap_err();
        assert!(matches!(err, SourceTraceError::Schema { .. }));
    }

    #[test]
    fn preserves_unknown_fields() {
        let mut v = minimal_payload();
        v["experimental_score"] = serde_json::json!(42);
        v["claims"][0]["novelty"] = serde_json::json!("high");
        let payload = validate_payload(&serde_json::to_vec(&v).unwrap()).unwrap();
        assert_eq!(payload.extra["experimental_score"], serde_json::json!(42));
        assert_eq!(payload.claims[0].extra["novelty"], serde_json::json!("high"));
    }
}
