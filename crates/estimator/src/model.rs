//! Model family resolution.
//!
//! A model identifier resolves to a canonical identifier from [`KNOWN_MODELS`]
//! either by exact match or through exactly one [`FAMILY_FALLBACKS`] rule.

use std::fmt;

use crate::error::EstimateError;

/// Fixed token overheads the provider adds beyond the literal text tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTokenCost {
    /// Added once per message.
    pub message: i64,
    /// Added once per message that carries a non-empty name. May be negative.
    pub name: i64,
}

/// Group of models sharing one fixed cost profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// The `0613` and `0314` snapshots.
    Standard,
    /// `gpt-3.5-turbo-0301`.
    Legacy,
}

impl ModelFamily {
    pub fn fixed_cost(self) -> FixedTokenCost {
        match self {
            ModelFamily::Standard => FixedTokenCost { message: 3, name: 1 },
            // every message follows <|start|>{role/name}\n{content}<|end|>\n,
            // and the role is omitted when a name is present
            ModelFamily::Legacy => FixedTokenCost { message: 4, name: -1 },
        }
    }
}

impl AsRef<str> for ModelFamily {
    fn as_ref(&self) -> &str {
        match self {
            ModelFamily::Standard => "standard",
            ModelFamily::Legacy => "legacy",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_ref())
    }
}

/// Model identifiers with a known fixed cost profile. Matched exactly.
pub const KNOWN_MODELS: &[(&str, ModelFamily)] = &[
    ("gpt-3.5-turbo-0613", ModelFamily::Standard),
    ("gpt-3.5-turbo-16k-0613", ModelFamily::Standard),
    ("gpt-4-0314", ModelFamily::Standard),
    ("gpt-4-32k-0314", ModelFamily::Standard),
    ("gpt-4-0613", ModelFamily::Standard),
    ("gpt-4-32k-0613", ModelFamily::Standard),
    ("gpt-3.5-turbo-0301", ModelFamily::Legacy),
];

/// Substring rules for identifiers missing from [`KNOWN_MODELS`], checked in
/// order. The first pattern contained in the model name selects the target.
pub const FAMILY_FALLBACKS: &[(&str, &str)] = &[
    ("gpt-3.5-turbo", "gpt-3.5-turbo-0613"),
    ("gpt-4", "gpt-4-0613"),
];

/// Outcome of resolving a model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedModel {
    /// Identifier from [`KNOWN_MODELS`] whose profile and tokenizer apply.
    pub canonical: &'static str,
    pub family: ModelFamily,
    /// Whether a fallback rule was needed to reach `canonical`.
    pub via_fallback: bool,
}

impl ResolvedModel {
    pub fn fixed_cost(&self) -> FixedTokenCost {
        self.family.fixed_cost()
    }
}

/// Resolve a model identifier to its canonical entry and cost profile.
///
/// Matching is case-sensitive in both stages.
pub fn resolve_model(model: &str) -> Result<ResolvedModel, EstimateError> {
    if let Some((canonical, family)) = lookup(model) {
        return Ok(ResolvedModel {
            canonical,
            family,
            via_fallback: false,
        });
    }

    let target = FAMILY_FALLBACKS
        .iter()
        .find(|(pattern, _)| model.contains(pattern))
        .map(|(_, target)| *target);

    match target.and_then(lookup) {
        Some((canonical, family)) => {
            log::debug!("Model '{model}' is not pinned, counting tokens as '{canonical}'");

            Ok(ResolvedModel {
                canonical,
                family,
                via_fallback: true,
            })
        }
        None => Err(EstimateError::UnsupportedModel(model.to_string())),
    }
}

fn lookup(model: &str) -> Option<(&'static str, ModelFamily)> {
    KNOWN_MODELS
        .iter()
        .find(|(known, _)| *known == model)
        .map(|(known, family)| (*known, *family))
}

#[cfg(test)]
mod tests {
    use insta::assert_debug_snapshot;

    use super::*;

    #[test]
    fn exact_match_standard() {
        let resolved = resolve_model("gpt-4-32k-0314").unwrap();

        assert_debug_snapshot!(resolved, @r#"
        ResolvedModel {
            canonical: "gpt-4-32k-0314",
            family: Standard,
            via_fallback: false,
        }
        "#);
    }

    #[test]
    fn exact_match_legacy() {
        let resolved = resolve_model("gpt-3.5-turbo-0301").unwrap();

        assert_eq!(resolved.family, ModelFamily::Legacy);
        assert_eq!(resolved.fixed_cost(), FixedTokenCost { message: 4, name: -1 });
        assert!(!resolved.via_fallback);
    }

    #[test]
    fn aliases_fall_back_to_family_snapshot() {
        let turbo = resolve_model("gpt-3.5-turbo").unwrap();
        let gpt4 = resolve_model("gpt-4").unwrap();

        assert_eq!(turbo.canonical, "gpt-3.5-turbo-0613");
        assert!(turbo.via_fallback);
        assert_eq!(gpt4.canonical, "gpt-4-0613");
        assert!(gpt4.via_fallback);
    }

    #[test]
    fn newer_snapshots_fall_back() {
        assert_eq!(resolve_model("gpt-4-1106-preview").unwrap().canonical, "gpt-4-0613");
        assert_eq!(resolve_model("gpt-4o-mini").unwrap().canonical, "gpt-4-0613");
        assert_eq!(resolve_model("gpt-3.5-turbo-1106").unwrap().canonical, "gpt-3.5-turbo-0613");
    }

    #[test]
    fn turbo_rule_wins_over_gpt4_rule() {
        let resolved = resolve_model("gpt-4-vs-gpt-3.5-turbo").unwrap();
        assert_eq!(resolved.canonical, "gpt-3.5-turbo-0613");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let error = resolve_model("GPT-4").unwrap_err();
        assert_eq!(error.to_string(), "token counting method for model GPT-4 is unknown");

        assert!(resolve_model("Gpt-3.5-Turbo-0613").is_err());
    }

    #[test]
    fn unknown_model() {
        let error = resolve_model("totally-unknown-model").unwrap_err();
        assert!(matches!(error, EstimateError::UnsupportedModel(ref model) if model == "totally-unknown-model"));
        assert_eq!(error.error_type(), "unsupported_model");
    }

    #[test]
    fn empty_model_is_unknown() {
        assert!(matches!(resolve_model(""), Err(EstimateError::UnsupportedModel(_))));
    }

    #[test]
    fn fallback_targets_are_known_models() {
        for (_, target) in FAMILY_FALLBACKS {
            assert!(lookup(target).is_some(), "{target} missing from KNOWN_MODELS");
        }
    }
}
