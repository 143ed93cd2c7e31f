//! Estimator configuration structures.

use serde::Deserialize;

/// Prompt token estimator configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Whether tool definitions take part in the estimate.
    pub tool_accounting: ToolAccountingMode,
    /// Overheads used when tool accounting is experimental.
    pub tool_costs: ToolCostsConfig,
}

/// Tool definition accounting mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolAccountingMode {
    /// Tool definitions add no tokens.
    #[default]
    Disabled,
    /// Tool definitions are approximated with `tool_costs`.
    Experimental,
}

/// Fixed token overheads for tool definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolCostsConfig {
    /// Added once when a request has any tools.
    pub tools: i64,
    /// Added once per function with parameters.
    pub tool_parameters: i64,
    /// Added per property with a type.
    pub property_type: i64,
    /// Added per property with a description.
    pub property_description: i64,
    /// Added per property with an enum.
    pub property_enum: i64,
    /// Added per enum element.
    pub property_enum_element: i64,
}

impl Default for ToolCostsConfig {
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

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use insta::assert_debug_snapshot;

    #[test]
    fn estimator_config_defaults() {
        let config: EstimatorConfig = toml::from_str("").unwrap();

        assert_debug_snapshot!(&config, @r#"
        EstimatorConfig {
            tool_accounting: Disabled,
            tool_costs: ToolCostsConfig {
                tools: 12,
                tool_parameters: 11,
                property_type: 2,
                property_description: 2,
                property_enum: -3,
                property_enum_element: 3,
            },
        }
        "#);
    }

    #[test]
    fn experimental_with_partial_overrides() {
        let config = indoc! {r#"
            tool_accounting = "experimental"

            [tool_costs]
            tools = 9
            property_enum = -2
        "#};

        let config: EstimatorConfig = toml::from_str(config).unwrap();

        assert_debug_snapshot!(&config, @r#"
        EstimatorConfig {
            tool_accounting: Experimental,
            tool_costs: ToolCostsConfig {
                tools: 9,
                tool_parameters: 11,
                property_type: 2,
                property_description: 2,
                property_enum: -2,
                property_enum_element: 3,
            },
        }
        "#);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let error = toml::from_str::<EstimatorConfig>(r#"tool_accounting = "exact""#).unwrap_err();

        assert!(error.to_string().contains("unknown variant `exact`"));
    }

    #[test]
    fn unknown_cost_field_is_rejected() {
        let config = indoc! {r#"
            [tool_costs]
            functions = 1
        "#};

        let error = toml::from_str::<EstimatorConfig>(config).unwrap_err();

        assert!(error.to_string().contains("unknown field `functions`"));
    }
}
