//! Reading catalogs from the messages directory.

use std::collections::BTreeMap;

use intl_error::{IntlError, Result};

use crate::catalog::Catalog;
use crate::config::IntlConfig;

/// Load `<messages_dir>/<locale>.json`.
#[tracing::instrument(skip_all, fields(locale = %locale))]
pub fn load_catalog(config: &IntlConfig, locale: &str) -> Result<Catalog> {
    let path = config.catalog_path(locale);
    tracing::debug!(path = %path.display(), "loading messages");

    let source = std::fs::read_to_string(&path).map_err(|e| {
        IntlError::missing_message(format!(
            "could not load messages for locale `{}` from '{}'",
            locale,
            path.display()
        ))
        .set_source(e)
    })?;

    let catalog = Catalog::from_json_str(locale, &source)?;
    tracing::trace!(keys = catalog.keys().len(), "messages loaded");
    Ok(catalog)
}

/// Load the catalog of every configured locale, stopping at the first failure.
#[tracing::instrument(skip_all)]
pub fn load_all(config: &IntlConfig) -> Result<BTreeMap<String, Catalog>> {
    config
        .locales
        .iter()
        .map(|locale| Ok((locale.clone(), load_catalog(config, locale)?)))
        .collect()
}
