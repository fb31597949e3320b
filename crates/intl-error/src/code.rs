//! Error codes for translation operations

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The category of a translation failure.
///
/// The string form of each code is its SCREAMING_SNAKE_CASE name, which is
/// also what ends up at the front of every composed error message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoStaticStr,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntlErrorCode {
    /// A key or namespace is not present in the catalog, or no catalog
    /// could be loaded for the locale.
    MissingMessage,

    /// A message refers to a named format that is not configured.
    MissingFormat,

    /// Locale or time zone was not configured and a default was used.
    EnvironmentFallback,

    /// The key resolved to a group of messages rather than a single message.
    InsufficientPath,

    /// The message source could not be parsed.
    InvalidMessage,

    /// A catalog key contains a `.`, which is reserved as the path separator.
    InvalidKey,

    /// The message parsed but could not be formatted with the given arguments.
    FormattingError,
}

impl IntlErrorCode {
    /// Returns the code as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Iterate over every code.
    pub fn iter() -> impl Iterator<Item = IntlErrorCode> {
        <Self as strum::IntoEnumIterator>::iter()
    }

    /// A fallback still produced a usable value; callers usually only warn.
    pub fn is_fallback(&self) -> bool {
        matches!(self, IntlErrorCode::EnvironmentFallback)
    }
}
