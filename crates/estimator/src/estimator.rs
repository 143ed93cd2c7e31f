use crate::{
    error::EstimateError,
    messages::ChatCompletionRequest,
    model::{self, FixedTokenCost},
    normalize::{self, NormalizedMessage},
    tokenizer::{self, TokenCounter},
    tools::ToolAccounting,
};

/// Prompt token estimator for chat completion requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Estimator {
    tool_accounting: ToolAccounting,
}

impl From<&config::EstimatorConfig> for Estimator {
    fn from(settings: &config::EstimatorConfig) -> Self {
        Self::new(ToolAccounting::from(settings))
    }
}

impl Estimator {
    pub fn new(tool_accounting: ToolAccounting) -> Self {
        Self { tool_accounting }
    }

    pub fn tool_accounting(&self) -> ToolAccounting {
        self.tool_accounting
    }

    /// Estimate the prompt tokens `request` will consume on `model`.
    ///
    /// The total is the sum over all messages of the family's per-message
    /// overhead, the tokens of content, role and name, and the per-name
    /// overhead for messages with a non-empty name. Tool definitions are added
    /// according to the configured [`ToolAccounting`].
    pub fn count_prompt_tokens(&self, model: &str, request: Option<&ChatCompletionRequest>) -> Result<i64, EstimateError> {
        let request = request.ok_or(EstimateError::InvalidInput)?;
        let resolved = model::resolve_model(model)?;
        let tokenizer = tokenizer::for_model(resolved.canonical)?;
        let messages = normalize::normalize(&request.messages)?;

        let mut tokens = count_messages(resolved.fixed_cost(), &*tokenizer, &messages);

        if let Some(tools) = &request.tools {
            tokens += self.tool_accounting.count(&*tokenizer, tools);
        }

        log::trace!(
            "Estimated {tokens} prompt tokens for {} messages on '{}'",
            messages.len(),
            resolved.canonical
        );

        Ok(tokens)
    }
}

/// Sum the fixed and text token cost of normalized messages.
pub(crate) fn count_messages<T>(cost: FixedTokenCost, tokenizer: &T, messages: &[NormalizedMessage<'_>]) -> i64
where
    T: TokenCounter + ?Sized,
{
    let mut tokens = 0;

    for message in messages {
        tokens += cost.message;

        for s in [message.content, message.role, message.name] {
            tokens += tokenizer.count(s);
        }

        if !message.name.is_empty() {
            tokens += cost.name;
        }
    }

    tokens
}
