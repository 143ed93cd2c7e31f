//! Projection of request messages onto the fields that are counted.

use crate::{
    error::EstimateError,
    messages::{ChatMessage, MessageContent},
};

/// The subset of a chat message that takes part in token counting.
///
/// Tool calls, tool call ids and anything else on the message are dropped, so
/// their tokens are not part of the estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMessage<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub content: &'a str,
}

/// Project every message, keeping order and length.
///
/// Absent names and contents become empty strings. Content in array form has
/// no single string representation and fails the projection.
pub fn normalize(messages: &[ChatMessage]) -> Result<Vec<NormalizedMessage<'_>>, EstimateError> {
    messages
        .iter()
        .enumerate()
        .map(|(index, message)| {
            let content = match &message.content {
                None => "",
                Some(MessageContent::Text(text)) => text.as_str(),
                Some(MessageContent::Parts(_)) => {
                    return Err(EstimateError::NormalizationFailure {
                        index,
                        message: "content must be a string, got an array of parts".to_string(),
                    });
                }
            };

            Ok(NormalizedMessage {
                name: message.name.as_deref().unwrap_or_default(),
                role: message.role.as_ref(),
                content,
            })
        })
        .collect()
}
