use stunner_gateway_model::UnknownProtocol;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{kind} {key} not found")]
    NotFound { kind: &'static str, key: String },
    #[error("unsupported protocol: {0}")]
    UnsupportedProtocol(String),
    #[error("cannot serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RenderError {
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        RenderError::NotFound { kind, key: key.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderError::NotFound { .. })
    }
}

impl From<UnknownProtocol> for RenderError {
    fn from(value: UnknownProtocol) -> Self {
        RenderError::UnsupportedProtocol(value.0)
    }
}
