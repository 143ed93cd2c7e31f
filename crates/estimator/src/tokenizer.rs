//! Tokenizer acquisition.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use tiktoken_rs::CoreBPE;

use crate::error::EstimateError;

/// Anything that can report how many tokens a piece of text encodes to.
pub trait TokenCounter {
    /// Number of tokens in `text`. The empty string is always 0.
    fn count(&self, text: &str) -> i64;
}

impl TokenCounter for CoreBPE {
    fn count(&self, text: &str) -> i64 {
        if text.is_empty() {
            return 0;
        }

        // Special tokens are neither allowed nor rejected, they encode as text.
        self.encode_ordinary(text).len() as i64
    }
}

/// Loaded encoders, keyed by canonical model identifier.
static TOKENIZERS: LazyLock<DashMap<&'static str, Arc<CoreBPE>>> = LazyLock::new(DashMap::new);

/// Get or load the tokenizer for a canonical model identifier.
pub(crate) fn for_model(model: &'static str) -> Result<Arc<CoreBPE>, EstimateError> {
    if let Some(tokenizer) = TOKENIZERS.get(model) {
        return Ok(Arc::clone(&tokenizer));
    }

    log::debug!("Loading tokenizer for model '{model}'");

    let tokenizer = tiktoken_rs::get_bpe_from_model(model).map_err(|e| EstimateError::TokenizerUnavailable {
        model: model.to_string(),
        message: e.to_string(),
    })?;

    // Another caller may have won the race; either encoder is equivalent.
    Ok(Arc::clone(&TOKENIZERS.entry(model).or_insert_with(|| Arc::new(tokenizer))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_zero_tokens() {
        let tokenizer = for_model("gpt-4-0613").unwrap();
        assert_eq!(tokenizer.count(""), 0);
    }

    #[test]
    fn single_word_tokens() {
        let tokenizer = for_model("gpt-3.5-turbo-0613").unwrap();

        assert_eq!(tokenizer.count("hello"), 1);
        assert_eq!(tokenizer.count("user"), 1);
        assert_eq!(tokenizer.count("assistant"), 1);
    }

    #[test]
    fn special_token_text_is_not_rejected() {
        let tokenizer = for_model("gpt-4-0613").unwrap();
        assert!(tokenizer.count("<|endoftext|>") > 1);
    }

    #[test]
    fn tokenizers_are_cached() {
        let first = for_model("gpt-4-32k-0613").unwrap();
        let second = for_model("gpt-4-32k-0613").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn every_known_model_has_a_tokenizer() {
        for (model, _) in crate::model::KNOWN_MODELS {
            assert!(for_model(*model).is_ok(), "no tokenizer for {model}");
        }
    }
}
