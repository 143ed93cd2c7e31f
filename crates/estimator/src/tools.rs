//! Token accounting for tool definitions.
//!
//! Tool definitions reach the model as a system message in an undocumented
//! encoding. The experimental strategy approximates it with constants
//! reverse-engineered from non-streaming responses and has not been checked
//! for accuracy, so the default strategy counts nothing.

use serde_json::Value;

use crate::{messages::Tool, tokenizer::TokenCounter};

/// How tool definitions contribute to the prompt estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolAccounting {
    /// Tool definitions add zero tokens.
    #[default]
    Disabled,
    /// Approximate tool definitions with the given overheads.
    Experimental(ToolTokenCost),
}

/// Fixed overheads used by [`ToolAccounting::Experimental`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolTokenCost {
    /// Added once when the request has any tools.
    pub tools: i64,
    /// Added once per function with parameters.
    pub tool_parameters: i64,
    pub property_type: i64,
    pub property_description: i64,
    /// Added once per property with an `enum`, before its elements.
    pub property_enum: i64,
    pub property_enum_element: i64,
}

impl Default for ToolTokenCost {
    fn default() -> Self {
        Self {
            tools: 12,
            tool_parameters: 11,
            property_type: 2,
            property_description: 2,
            property_enum: -3,
            property_enum_element: 3,
        }
    }
}

impl From<&config::EstimatorConfig> for ToolAccounting {
    fn from(settings: &config::EstimatorConfig) -> Self {
        match settings.tool_accounting {
            config::ToolAccountingMode::Disabled => ToolAccounting::Disabled,
            config::ToolAccountingMode::Experimental => ToolAccounting::Experimental(settings.tool_costs.into()),
        }
    }
}

impl From<config::ToolCostsConfig> for ToolTokenCost {
    fn from(costs: config::ToolCostsConfig) -> Self {
        Self {
            tools: costs.tools,
            tool_parameters: costs.tool_parameters,
            property_type: costs.property_type,
            property_description: costs.property_description,
            property_enum: costs.property_enum,
            property_enum_element: costs.property_enum_element,
        }
    }
}

impl ToolAccounting {
    /// Tokens contributed by the tool definitions of a request.
    pub fn count<T>(&self, tokenizer: &T, tools: &[Tool]) -> i64
    where
        T: TokenCounter + ?Sized,
    {
        match self {
            ToolAccounting::Disabled => 0,
            ToolAccounting::Experimental(cost) => count_experimental(cost, tokenizer, tools),
        }
    }
}

fn count_experimental<T>(cost: &ToolTokenCost, tokenizer: &T, tools: &[Tool]) -> i64
where
    T: TokenCounter + ?Sized,
{
    let mut tokens = 0;

    for tool in tools {
        let Some(function) = tool.function.as_ref().filter(|_| tool.kind == "function") else {
            continue;
        };

        tokens += tokenizer.count(function.description.as_deref().unwrap_or_default());
        tokens += tokenizer.count(&function.name);

        let properties = function
            .parameters
            .as_ref()
            .and_then(|parameters| parameters.get("properties"))
            .and_then(Value::as_object);

        for (property_name, property) in properties.into_iter().flatten() {
            tokens += tokenizer.count(property_name);

            if let Some(kind) = non_empty_str(property, "type") {
                tokens += cost.property_type + tokenizer.count(kind);
            }

            if let Some(description) = non_empty_str(property, "description") {
                tokens += cost.property_description + tokenizer.count(description);
            }

            if let Some(elements) = property.get("enum").and_then(Value::as_array) {
                tokens += cost.property_enum;

                for element in elements {
                    tokens += cost.property_enum_element;

                    if let Some(s) = element.as_str() {
                        tokens += tokenizer.count(s);
                    }
                }
            }
        }

        let has_parameters = function
            .parameters
            .as_ref()
            .and_then(Value::as_object)
            .is_some_and(|parameters| !parameters.is_empty());

        if has_parameters {
            tokens += cost.tool_parameters;
        }
    }

    if !tools.is_empty() {
        tokens += cost.tools;
    }

    tokens
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}
