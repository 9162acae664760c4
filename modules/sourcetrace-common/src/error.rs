use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceTraceError {
    #[error("Payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Schema violation at `{field}`: {reason}")]
    Schema { field: String, reason: String },

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl SourceTraceError {
    pub fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
