use std::{
    fs::File,
    io::{self, Read, Write},
    path::Path,
};

use anyhow::{Context, bail};
use config::Config;
use estimator::{ChatCompletionRequest, Estimator};
use serde::Serialize;

use crate::args::{CountArgs, OutputFormat};

#[derive(Debug, Serialize)]
struct CountOutput<'a> {
    model: &'a str,
    resolved_model: &'a str,
    prompt_tokens: i64,
}

pub(crate) fn run(args: &CountArgs, config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    let input = match args.file.as_deref() {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            read_input(file)?
        }
        _ => read_input(io::stdin().lock())?,
    };

    count(args, config, &input, out)
}

fn read_input(mut reader: impl Read) -> anyhow::Result<String> {
    let mut input = String::new();
    reader.read_to_string(&mut input).context("Failed to read request")?;

    Ok(input)
}

fn count(args: &CountArgs, config: &Config, input: &str, out: &mut impl Write) -> anyhow::Result<()> {
    // `null` deserializes to `None` and is rejected by the estimator.
    let request: Option<ChatCompletionRequest> =
        serde_json::from_str(input).context("Failed to parse chat completion request")?;

    let model = select_model(args, config, request.as_ref());

    if model.is_none() && request.is_some() {
        bail!("No model given. Pass --model, set `model` in the request or configure cli.default_model");
    }

    let model = model.unwrap_or_default();
    let token_estimator = Estimator::from(&config.estimator);

    log::debug!(
        "Counting prompt tokens for model '{model}' with tool accounting {:?}",
        token_estimator.tool_accounting()
    );

    let prompt_tokens = token_estimator
        .count_prompt_tokens(model, request.as_ref())
        .context("Failed to count prompt tokens")?;

    match args.format {
        OutputFormat::Text => writeln!(out, "{prompt_tokens}")?,
        OutputFormat::Json => {
            let resolved = estimator::resolve_model(model)?;

            let output = CountOutput {
                model,
                resolved_model: resolved.canonical,
                prompt_tokens,
            };

            serde_json::to_writer(&mut *out, &output)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

/// Command line flag first, then the request itself, then configuration.
fn select_model<'a>(args: &'a CountArgs, config: &'a Config, request: Option<&'a ChatCompletionRequest>) -> Option<&'a str> {
    args.model
        .as_deref()
        .or_else(|| request.map(|request| request.model.as_str()))
        .filter(|model| !model.is_empty())
        .or(config.cli.default_model.as_deref())
}
