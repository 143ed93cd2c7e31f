use thiserror::Error;

/// Errors returned by prompt token estimation.
///
/// Every variant is terminal: nothing is retried and no partial count is
/// reported alongside it.
#[derive(Debug, Error)]
pub enum EstimateError {
    /// The caller passed no request.
    #[error("nil request, can't count tokens")]
    InvalidInput,

    /// The model is neither in the known table nor matches a family fallback.
    #[error("token counting method for model {0} is unknown")]
    UnsupportedModel(String),

    /// The BPE tokenizer for the resolved model could not be loaded.
    #[error("failed to get encoding for model {model}: {message}")]
    TokenizerUnavailable { model: String, message: String },

    /// A message could not be projected onto `{name, role, content}`.
    #[error("failed to convert message {index} to a token counting message: {message}")]
    NormalizationFailure { index: usize, message: String },
}

impl EstimateError {
    /// Get the error type string, stable across releases.
    pub fn error_type(&self) -> &str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::UnsupportedModel(_) => "unsupported_model",
            Self::TokenizerUnavailable { .. } => "tokenizer_unavailable",
            Self::NormalizationFailure { .. } => "normalization_failure",
        }
    }
}
