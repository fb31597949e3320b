//! A small ICU MessageFormat subset: arguments, numbers, plural and select.
//!
//! Parse failures are `INVALID_MESSAGE`. Formatting failures are
//! `FORMATTING_ERROR`, or `MISSING_FORMAT` for an unknown number style.

mod parse;
mod render;

pub use parse::{Message, Part, PluralSelector, parse};
pub use render::{FormatArgs, FormatValue, format, render_number};
