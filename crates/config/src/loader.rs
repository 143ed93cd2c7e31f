use std::path::Path;

use anyhow::{Context, bail};
use indoc::indoc;

use crate::Config;

pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let path = path.as_ref();

    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read configuration from {}", path.display()))?;

    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse configuration at {}", path.display()))?;

    validate(&config)?;

    for warning in warnings(&config) {
        log::warn!("{warning}");
    }

    Ok(config)
}

pub(crate) fn validate(config: &Config) -> anyhow::Result<()> {
    let empty_default_model = config
        .cli
        .default_model
        .as_deref()
        .is_some_and(|model| model.trim().is_empty());

    if empty_default_model {
        bail!(indoc! {r#"
            The default model must not be empty. Either remove the setting or name a model:

              [cli]
              default_model = "gpt-4"
        "#});
    }

    Ok(())
}

/// Settings that are valid but probably not what the user meant.
pub(crate) fn warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.estimator.tool_accounting == crate::ToolAccountingMode::Disabled
        && config.estimator.tool_costs != crate::ToolCostsConfig::default()
    {
        warnings.push(
            "Tool costs are configured but tool accounting is disabled. Set estimator.tool_accounting = \"experimental\" to use them"
                .to_string(),
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use indoc::indoc;
    use insta::{assert_debug_snapshot, assert_snapshot};

    use crate::Config;

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(super::validate(&config).is_ok());

        assert_debug_snapshot!(&config, @r#"
        Config {
            estimator: EstimatorConfig {
                tool_accounting: Disabled,
                tool_costs: ToolCostsConfig {
                    tools: 12,
                    tool_parameters: 11,
                    property_type: 2,
                    property_description: 2,
                    property_enum: -3,
                    property_enum_element: 3,
                },
            },
            cli: CliConfig {
                default_model: None,
            },
        }
        "#);
    }

    #[test]
    fn empty_default_model_fails_validation() {
        let config_str = indoc! {r#"
            [cli]
            default_model = " "
        "#};

        let config: Config = toml::from_str(config_str).unwrap();
        let error = super::validate(&config).unwrap_err().to_string();

        assert_snapshot!(error, @r#"
        The default model must not be empty. Either remove the setting or name a model:

          [cli]
          default_model = "gpt-4"
        "#);
    }

    #[test]
    fn unknown_section_is_rejected() {
        let result = toml::from_str::<Config>("[server]\nlisten_address = \"127.0.0.1:8000\"");
        assert!(result.is_err());
    }

    #[test]
    fn tool_costs_without_accounting_warns() {
        let config_str = indoc! {r#"
            [estimator.tool_costs]
            tools = 20
        "#};

        let config: Config = toml::from_str(config_str).unwrap();

        assert_debug_snapshot!(super::warnings(&config), @r#"
        [
            "Tool costs are configured but tool accounting is disabled. Set estimator.tool_accounting = \"experimental\" to use them",
        ]
        "#);
    }

    #[test]
    fn experimental_tool_costs_do_not_warn() {
        let config_str = indoc! {r#"
            [estimator]
            tool_accounting = "experimental"

            [estimator.tool_costs]
            tools = 20
        "#};

        let config: Config = toml::from_str(config_str).unwrap();
        assert!(super::warnings(&config).is_empty());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();

        write!(
            file,
            "{}",
            indoc! {r#"
                [estimator]
                tool_accounting = "experimental"

                [cli]
                default_model = "gpt-3.5-turbo"
            "#}
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.estimator.tool_accounting, crate::ToolAccountingMode::Experimental);
        assert_eq!(config.cli.default_model.as_deref(), Some("gpt-3.5-turbo"));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[estimator\n").unwrap();

        let error = Config::load(file.path()).unwrap_err();

        assert!(error.to_string().starts_with("Failed to parse configuration at "));
    }
}
