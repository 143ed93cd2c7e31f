use std::io::Write;

use estimator::{FAMILY_FALLBACKS, KNOWN_MODELS};

/// Print the pinned models and the fallback rules for everything else.
pub(crate) fn run(out: &mut impl Write) -> anyhow::Result<()> {
    for (model, family) in KNOWN_MODELS {
        let cost = family.fixed_cost();

        writeln!(
            out,
            "{model:<24} {family:<8} message={:<2} name={}",
            cost.message, cost.name
        )?;
    }

    for (pattern, target) in FAMILY_FALLBACKS {
        writeln!(out, "*{pattern}* -> {target}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    #[test]
    fn lists_models_and_fallbacks() {
        let mut out = Vec::new();
        super::run(&mut out).unwrap();

        assert_snapshot!(String::from_utf8(out).unwrap(), @r"
        gpt-3.5-turbo-0613       standard message=3  name=1
        gpt-3.5-turbo-16k-0613   standard message=3  name=1
        gpt-4-0314               standard message=3  name=1
        gpt-4-32k-0314           standard message=3  name=1
        gpt-4-0613               standard message=3  name=1
        gpt-4-32k-0613           standard message=3  name=1
        gpt-3.5-turbo-0301       legacy   message=4  name=-1
        *gpt-3.5-turbo* -> gpt-3.5-turbo-0613
        *gpt-4* -> gpt-4-0613
        ");
    }
}
