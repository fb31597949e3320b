//! `intl translate`: look up and format one key.

use intl_core::{FormatArgs, FormatValue, IntlConfig, Result, Translator, load_catalog, negotiate};

/// Everything needed to translate one key.
#[derive(Debug, Clone, Default)]
pub struct TranslateRequest {
    pub locale: Option<String>,
    pub accept_language: Option<String>,
    pub namespace: Option<String>,
    pub key: String,
    pub args: Vec<(String, String)>,
    /// Return the error instead of the fallback string.
    pub strict: bool,
}

/// Parse a `name=value` argument.
pub fn parse_arg(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got `{raw}`")),
    }
}

/// Values stay text; number and plural placeholders parse them when used.
fn to_format_args(args: &[(String, String)]) -> FormatArgs {
    let mut out = FormatArgs::new();
    for (name, value) in args {
        out.insert(name.clone(), FormatValue::String(value.clone()));
    }
    out
}

pub fn translate(config: &IntlConfig, request: &TranslateRequest) -> Result<String> {
    let matched = negotiate(
        config,
        request.locale.as_deref(),
        request.accept_language.as_deref(),
    );
    tracing::debug!(locale = %matched.locale, fell_back = matched.fell_back, "locale negotiated");

    let mut translator = Translator::from_config(config, load_catalog(config, &matched.locale)?);
    if let Some(err) = matched.fallback_error() {
        translator.report(&err);
    }
    if let Some(namespace) = &request.namespace {
        translator = translator.with_namespace(namespace);
    }

    let args = to_format_args(&request.args);
    if request.strict {
        translator.try_t(&request.key, &args)
    } else {
        Ok(translator.t(&request.key, &args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_arg() {
        assert_eq!(
            parse_arg("name=Jane").unwrap(),
            ("name".to_string(), "Jane".to_string())
        );
        assert_eq!(
            parse_arg("expr=a=b").unwrap(),
            ("expr".to_string(), "a=b".to_string())
        );
        assert!(parse_arg("novalue").is_err());
        assert!(parse_arg("=x").is_err());
    }

    #[test]
    fn test_args_keep_their_text() {
        let args = to_format_args(&[
            ("zip".to_string(), "01234".to_string()),
            ("name".to_string(), "Jane".to_string()),
        ]);
        assert_eq!(args.get("zip"), Some(&FormatValue::String("01234".into())));
        assert_eq!(args.get("name"), Some(&FormatValue::String("Jane".into())));
    }
}
