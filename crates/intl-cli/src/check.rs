//! `intl check`: validate every catalog of a project.

use std::fmt::Write;

use intl_core::format::parse;
use intl_core::{IntlConfig, IntlError, load_catalog};

/// Load and validate all catalogs, returning every problem found.
///
/// Catalogs that fail to load are reported and skipped. Every message of a
/// loaded catalog is parsed, and keys present in the default locale but
/// absent from another locale are reported as missing.
pub fn check_project(config: &IntlConfig) -> Vec<IntlError> {
    let mut problems = Vec::new();
    let mut catalogs = Vec::new();

    for locale in &config.locales {
        match load_catalog(config, locale) {
            Ok(catalog) => catalogs.push(catalog),
            Err(e) => problems.push(e),
        }
    }

    for catalog in &catalogs {
        for path in catalog.keys() {
            let Ok(source) = catalog.resolve(None, &path) else {
                continue;
            };
            if let Err(e) = parse(source) {
                problems.push(IntlError::new(
                    e.code(),
                    Some(format!(
                        "{}:{}: {}",
                        catalog.locale(),
                        path,
                        e.original_message().unwrap_or_default()
                    )),
                ));
            }
        }
    }

    if let Some(default) = catalogs
        .iter()
        .find(|c| c.locale() == config.default_locale)
    {
        for catalog in catalogs.iter().filter(|c| c.locale() != default.locale()) {
            for path in catalog.missing_from(default) {
                problems.push(IntlError::missing_message(format!(
                    "`{}` is missing in locale `{}`",
                    path,
                    catalog.locale()
                )));
            }
        }
    }

    tracing::debug!(
        catalogs = catalogs.len(),
        problems = problems.len(),
        "check finished"
    );
    problems
}

/// One line per problem, or a JSON array when `json` is set.
pub fn render_report(problems: &[IntlError], json: bool) -> serde_json::Result<String> {
    if json {
        return serde_json::to_string_pretty(problems);
    }

    let mut out = String::new();
    for problem in problems {
        let _ = writeln!(out, "{}", problem);
    }
    Ok(out)
}
