//! Project configuration read from `intl.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use intl_error::{IntlError, Result};

fn default_messages_dir() -> PathBuf {
    PathBuf::from("messages")
}

/// Locales, the catalog directory and named formats for one project.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntlConfig {
    pub locales: Vec<String>,
    pub default_locale: String,
    #[serde(default = "default_messages_dir")]
    pub messages_dir: PathBuf,
    #[serde(default)]
    pub formats: Formats,
}

/// Named formats that messages may refer to by style name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Formats {
    #[serde(default)]
    pub number: BTreeMap<String, NumberFormat>,
}

/// Options for a named number format, e.g. `{price, number, precise}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct NumberFormat {
    pub minimum_fraction_digits: u8,
    pub maximum_fraction_digits: u8,
    pub percent: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            minimum_fraction_digits: 0,
            maximum_fraction_digits: 3,
            percent: false,
        }
    }
}

impl NumberFormat {
    pub fn integer() -> Self {
        Self {
            maximum_fraction_digits: 0,
            ..Self::default()
        }
    }

    pub fn percent() -> Self {
        Self {
            maximum_fraction_digits: 0,
            percent: true,
            ..Self::default()
        }
    }
}

impl IntlConfig {
    /// Build a config in code. The result is validated like a loaded one.
    pub fn new(locales: &[&str], default_locale: &str) -> Result<Self> {
        let config = Self {
            locales: locales.iter().map(|l| l.to_string()).collect(),
            default_locale: default_locale.to_string(),
            messages_dir: default_messages_dir(),
            formats: Formats::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_messages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.messages_dir = dir.into();
        self
    }

    pub fn with_number_format(mut self, name: impl Into<String>, format: NumberFormat) -> Self {
        self.formats.number.insert(name.into(), format);
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: IntlConfig = toml::from_str(source).map_err(|e| {
            IntlError::invalid_message(format!("could not parse config: {}", e.message()))
                .set_source(e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. A relative `messages_dir` is taken relative to
    /// the directory holding the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            IntlError::invalid_message(format!("could not read config '{}'", path.display()))
                .set_source(e)
        })?;

        let mut config = Self::from_toml_str(&source)?;
        if config.messages_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.messages_dir = parent.join(&config.messages_dir);
            }
        }

        tracing::debug!(
            path = %path.display(),
            locales = config.locales.len(),
            "loaded intl config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.locales.is_empty() {
            return Err(IntlError::invalid_key("`locales` must not be empty"));
        }

        for locale in &self.locales {
            check_locale_tag(locale)?;
        }

        if !self.supports(&self.default_locale) {
            return Err(IntlError::missing_message(format!(
                "default locale `{}` is not one of the configured locales",
                self.default_locale
            )));
        }

        for (name, format) in &self.formats.number {
            if format.minimum_fraction_digits > format.maximum_fraction_digits {
                return Err(IntlError::invalid_message(format!(
                    "number format `{}` has minimum_fraction_digits above maximum_fraction_digits",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Whether `locale` is one of the configured locales (exact match).
    pub fn supports(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    /// Path of the catalog file for `locale`.
    pub fn catalog_path(&self, locale: &str) -> PathBuf {
        self.messages_dir.join(format!("{locale}.json"))
    }
}

fn check_locale_tag(tag: &str) -> Result<()> {
    if tag.is_empty() {
        return Err(IntlError::invalid_key("empty locale tag"));
    }
    if tag.contains(['.', '/', '\\']) {
        return Err(IntlError::invalid_key(format!(
            "locale tag `{}` contains a reserved character",
            tag
        )));
    }
    Ok(())
}
