//! Prompt token estimation for chat completion requests.
//!
//! Predicts how many prompt tokens a request will consume on an OpenAI chat
//! model, so callers can budget quota or trim a conversation before sending
//! it. The estimate combines per-family fixed overheads with a BPE tokenizer.

mod error;
mod estimator;
mod messages;
mod model;
mod normalize;
mod tokenizer;
mod tools;

pub use error::EstimateError;
pub use estimator::Estimator;
pub use messages::{
    ChatCompletionRequest, ChatMessage, ChatRole, ContentPart, FunctionCall, FunctionDefinition, MessageContent, Tool,
    ToolCall,
};
pub use model::{FAMILY_FALLBACKS, FixedTokenCost, KNOWN_MODELS, ModelFamily, ResolvedModel, resolve_model};
pub use normalize::{NormalizedMessage, normalize};
pub use tokenizer::TokenCounter;
pub use tools::{ToolAccounting, ToolTokenCost};

pub type Result<T> = std::result::Result<T, EstimateError>;

/// Estimate prompt tokens with tool definitions left out of the count.
///
/// See [`Estimator::count_prompt_tokens`].
pub fn count_prompt_tokens(model: &str, request: Option<&ChatCompletionRequest>) -> Result<i64> {
    Estimator::default().count_prompt_tokens(model, request)
}
