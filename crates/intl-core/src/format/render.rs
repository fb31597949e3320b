//! Formatting a parsed message with arguments.

use std::collections::BTreeMap;
use std::fmt;

use intl_error::{IntlError, Result};

use super::parse::{Message, Part, PluralSelector};
use crate::config::NumberFormat;

/// A value passed to a message placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatValue {
    String(String),
    Number(f64),
}

impl FormatValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            FormatValue::Number(n) => Some(*n),
            FormatValue::String(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for FormatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatValue::String(s) => f.write_str(s),
            FormatValue::Number(n) => f.write_str(&render_number(*n, NumberFormat::default())),
        }
    }
}

impl From<&str> for FormatValue {
    fn from(value: &str) -> Self {
        FormatValue::String(value.to_string())
    }
}

impl From<String> for FormatValue {
    fn from(value: String) -> Self {
        FormatValue::String(value)
    }
}

impl From<f64> for FormatValue {
    fn from(value: f64) -> Self {
        FormatValue::Number(value)
    }
}

macro_rules! impl_from_numeric {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FormatValue {
                fn from(value: $ty) -> Self {
                    FormatValue::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_numeric!(i32, i64, u32, u64, usize, f32);

/// Named arguments for one format call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatArgs {
    values: BTreeMap<String, FormatValue>,
}

impl FormatArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FormatValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FormatValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FormatValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Format `message` with `args`. Named number styles are looked up in
/// `formats` before the built-in `integer` and `percent` styles.
pub fn format(
    message: &Message,
    args: &FormatArgs,
    formats: &BTreeMap<String, NumberFormat>,
) -> Result<String> {
    let mut out = String::new();
    let renderer = Renderer { args, formats };
    renderer.render(&message.parts, None, &mut out)?;
    Ok(out)
}

struct Renderer<'a> {
    args: &'a FormatArgs,
    formats: &'a BTreeMap<String, NumberFormat>,
}

impl Renderer<'_> {
    fn value(&self, name: &str) -> Result<&FormatValue> {
        self.args.get(name).ok_or_else(|| {
            IntlError::formatting_error(format!("argument `{}` was not provided", name))
        })
    }

    fn number(&self, name: &str) -> Result<f64> {
        let value = self.value(name)?;
        value.as_number().ok_or_else(|| {
            IntlError::formatting_error(format!(
                "argument `{}` must be a number, got `{}`",
                name, value
            ))
        })
    }

    fn number_format(&self, style: Option<&str>) -> Result<NumberFormat> {
        let Some(style) = style else {
            return Ok(NumberFormat::default());
        };
        if let Some(format) = self.formats.get(style) {
            return Ok(*format);
        }
        match style {
            "integer" => Ok(NumberFormat::integer()),
            "percent" => Ok(NumberFormat::percent()),
            other => Err(IntlError::missing_format(format!(
                "Missing number format `{}`",
                other
            ))),
        }
    }

    fn render(&self, parts: &[Part], pound: Option<f64>, out: &mut String) -> Result<()> {
        for part in parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Argument(name) => out.push_str(&self.value(name)?.to_string()),
                Part::Number { name, style } => {
                    let format = self.number_format(style.as_deref())?;
                    out.push_str(&render_number(self.number(name)?, format));
                }
                Part::Pound => {
                    if let Some(n) = pound {
                        out.push_str(&render_number(n, NumberFormat::default()));
                    }
                }
                Part::Plural { name, branches } => {
                    let n = self.number(name)?;
                    let branch = branches
                        .iter()
                        .find(|(s, _)| matches!(s, PluralSelector::Exact(e) if *e == n))
                        .or_else(|| {
                            let category = plural_category(n);
                            branches.iter().find(
                                |(s, _)| matches!(s, PluralSelector::Category(c) if c == category),
                            )
                        })
                        .or_else(|| {
                            branches.iter().find(
                                |(s, _)| matches!(s, PluralSelector::Category(c) if c == "other"),
                            )
                        });
                    if let Some((_, parts)) = branch {
                        self.render(parts, Some(n), out)?;
                    }
                }
                Part::Select { name, branches } => {
                    let key = self.value(name)?.to_string();
                    let branch = branches
                        .iter()
                        .find(|(s, _)| *s == key)
                        .or_else(|| branches.iter().find(|(s, _)| s == "other"));
                    if let Some((_, parts)) = branch {
                        self.render(parts, pound, out)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// English cardinal plural category.
fn plural_category(n: f64) -> &'static str {
    if n == 1.0 { "one" } else { "other" }
}

/// Render `value` with at most `maximum_fraction_digits` decimals, trimming
/// trailing zeros down to `minimum_fraction_digits`.
pub fn render_number(value: f64, format: NumberFormat) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let value = if format.percent { value * 100.0 } else { value };
    let mut text = format!("{:.*}", format.maximum_fraction_digits as usize, value);

    if let Some(dot) = text.find('.') {
        let keep = dot + 1 + format.minimum_fraction_digits as usize;
        while text.len() > keep && text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }

    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text.remove(0);
    }

    if format.percent {
        text.push('%');
    }
    text
}
