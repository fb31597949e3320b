//! Parser for the supported MessageFormat subset.

use intl_error::{IntlError, Result};

/// A parsed message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Literal(String),
    /// `{name}`
    Argument(String),
    /// `{name, number}` or `{name, number, style}`
    Number { name: String, style: Option<String> },
    /// `{name, plural, ...}`
    Plural {
        name: String,
        branches: Vec<(PluralSelector, Vec<Part>)>,
    },
    /// `{name, select, ...}`
    Select {
        name: String,
        branches: Vec<(String, Vec<Part>)>,
    },
    /// `#` inside a plural branch
    Pound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PluralSelector {
    /// `=N`
    Exact(f64),
    /// `one`, `other`, ...
    Category(String),
}

impl Message {
    /// Whether the message is plain text with nothing to substitute.
    pub fn is_literal(&self) -> bool {
        self.parts.iter().all(|p| matches!(p, Part::Literal(_)))
    }
}

/// Parse `source` into a [`Message`].
pub fn parse(source: &str) -> Result<Message> {
    let mut parser = Parser {
        source,
        chars: source.chars().collect(),
        pos: 0,
    };
    let parts = parser.parse_parts(false, false)?;
    Ok(Message { parts })
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn error(&self, problem: &str) -> IntlError {
        IntlError::invalid_message(format!(
            "{} at offset {} in \"{}\"",
            problem, self.pos, self.source
        ))
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.error(&format!("expected `{}` but found `{}`", expected, c))),
            None => Err(self.error(&format!("expected `{}` but reached the end", expected))),
        }
    }

    /// Read a run of characters that are not whitespace or syntax.
    fn word(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !matches!(c, ',' | '{' | '}'))
        {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    /// Parse text and arguments until the end of input or, when `nested`,
    /// an unmatched `}` (left unconsumed).
    fn parse_parts(&mut self, in_plural: bool, nested: bool) -> Result<Vec<Part>> {
        let mut parts = Vec::new();
        let mut text = String::new();

        while let Some(c) = self.peek() {
            match c {
                '{' => {
                    flush(&mut parts, &mut text);
                    parts.push(self.parse_argument(in_plural)?);
                }
                '}' if nested => break,
                '}' => return Err(self.error("unmatched `}`")),
                '#' if in_plural => {
                    flush(&mut parts, &mut text);
                    self.pos += 1;
                    parts.push(Part::Pound);
                }
                '\'' => self.parse_quote(&mut text, in_plural),
                _ => {
                    text.push(c);
                    self.pos += 1;
                }
            }
        }

        if nested && self.peek().is_none() {
            return Err(self.error("unexpected end of message"));
        }

        flush(&mut parts, &mut text);
        Ok(parts)
    }

    /// `''` is an apostrophe; `'` before syntax starts a quoted run;
    /// any other `'` is literal.
    fn parse_quote(&mut self, text: &mut String, in_plural: bool) {
        self.pos += 1;
        match self.peek() {
            Some('\'') => {
                text.push('\'');
                self.pos += 1;
            }
            Some(c) if c == '{' || c == '}' || (c == '#' && in_plural) => {
                while let Some(c) = self.peek() {
                    self.pos += 1;
                    if c == '\'' {
                        if self.peek() == Some('\'') {
                            text.push('\'');
                            self.pos += 1;
                        } else {
                            return;
                        }
                    } else {
                        text.push(c);
                    }
                }
            }
            _ => text.push('\''),
        }
    }

    fn parse_argument(&mut self, in_plural: bool) -> Result<Part> {
        self.expect('{')?;
        self.skip_whitespace();
        let name = self.word();
        if name.is_empty() {
            return Err(self.error("expected an argument name"));
        }
        self.skip_whitespace();

        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(Part::Argument(name));
        }

        self.expect(',')?;
        self.skip_whitespace();
        let kind = self.word();
        self.skip_whitespace();

        match kind.as_str() {
            "number" => {
                let style = if self.peek() == Some(',') {
                    self.pos += 1;
                    self.skip_whitespace();
                    let style = self.word();
                    self.skip_whitespace();
                    if style.is_empty() {
                        return Err(self.error("expected a number style"));
                    }
                    Some(style)
                } else {
                    None
                };
                self.expect('}')?;
                Ok(Part::Number { name, style })
            }
            "plural" => {
                self.expect(',')?;
                let branches = self
                    .parse_branches(true)?
                    .into_iter()
                    .map(|(selector, parts)| Ok((self.plural_selector(&selector)?, parts)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Part::Plural { name, branches })
            }
            "select" => {
                self.expect(',')?;
                let branches = self.parse_branches(in_plural)?;
                Ok(Part::Select { name, branches })
            }
            "" => Err(self.error("expected an argument type")),
            other => Err(self.error(&format!("unsupported argument type `{}`", other))),
        }
    }

    /// Parse `key {...}` pairs up to and including the closing `}`.
    fn parse_branches(&mut self, in_plural: bool) -> Result<Vec<(String, Vec<Part>)>> {
        let mut branches = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(self.error("unexpected end of message")),
                _ => {}
            }

            let selector = self.word();
            if selector.is_empty() {
                return Err(self.error("expected a selector"));
            }
            if branches.iter().any(|(s, _)| *s == selector) {
                return Err(self.error(&format!("duplicate selector `{}`", selector)));
            }
            self.skip_whitespace();
            self.expect('{')?;
            let parts = self.parse_parts(in_plural, true)?;
            self.expect('}')?;
            branches.push((selector, parts));
        }

        if !branches.iter().any(|(s, _)| s == "other") {
            return Err(self.error("missing `other` branch"));
        }
        Ok(branches)
    }

    fn plural_selector(&self, selector: &str) -> Result<PluralSelector> {
        match selector.strip_prefix('=') {
            Some(number) => number
                .parse::<f64>()
                .map(PluralSelector::Exact)
                .map_err(|_| self.error(&format!("invalid plural selector `{}`", selector))),
            None => Ok(PluralSelector::Category(selector.to_string())),
        }
    }
}

fn flush(parts: &mut Vec<Part>, text: &mut String) {
    if !text.is_empty() {
        parts.push(Part::Literal(std::mem::take(text)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intl_error::IntlErrorCode;
    use pretty_assertions::assert_eq;

    fn lit(s: &str) -> Part {
        Part::Literal(s.to_string())
    }

    #[test]
    fn test_plain_text() {
        let message = parse("Hello world!").unwrap();
        assert_eq!(message.parts, vec![lit("Hello world!")]);
        assert!(message.is_literal());
    }

    #[test]
    fn test_argument() {
        let message = parse("Hello { name }!").unwrap();
        assert_eq!(
            message.parts,
            vec![lit("Hello "), Part::Argument("name".into()), lit("!")]
        );
        assert!(!message.is_literal());
    }

    #[test]
    fn test_number_with_style() {
        let message = parse("{ratio, number, percent}").unwrap();
        assert_eq!(
            message.parts,
            vec![Part::Number {
                name: "ratio".into(),
                style: Some("percent".into())
            }]
        );
    }

    #[test]
    fn test_plural() {
        let message = parse("{count, plural, =0 {none} one {# item} other {# items}}").unwrap();
        assert_eq!(
            message.parts,
            vec![Part::Plural {
                name: "count".into(),
                branches: vec![
                    (PluralSelector::Exact(0.0), vec![lit("none")]),
                    (
                        PluralSelector::Category("one".into()),
                        vec![Part::Pound, lit(" item")]
                    ),
                    (
                        PluralSelector::Category("other".into()),
                        vec![Part::Pound, lit(" items")]
                    ),
                ],
            }]
        );
    }

    #[test]
    fn test_select_with_nested_argument() {
        let message = parse("{gender, select, female {She is {name}} other {They are}}").unwrap();
        let Part::Select { name, branches } = &message.parts[0] else {
            panic!("expected select, got {:?}", message.parts);
        };
        assert_eq!(name, "gender");
        assert_eq!(branches[0].0, "female");
        assert_eq!(
            branches[0].1,
            vec![lit("She is "), Part::Argument("name".into())]
        );
    }

    #[test]
    fn test_pound_outside_plural_is_text() {
        let message = parse("Item #1").unwrap();
        assert_eq!(message.parts, vec![lit("Item #1")]);
    }

    #[test]
    fn test_quoting() {
        assert_eq!(parse("It''s").unwrap().parts, vec![lit("It's")]);
        assert_eq!(parse("I'm").unwrap().parts, vec![lit("I'm")]);
        assert_eq!(
            parse("'{name}' is {name}").unwrap().parts,
            vec![lit("{name} is "), Part::Argument("name".into())]
        );
    }

    #[test]
    fn test_invalid_messages() {
        for source in [
            "Hello {name",
            "Hello name}",
            "{}",
            "{count, plural, one {x}}",
            "{count, plural, other {x}",
            "{count, date}",
            "{count, plural, =x {a} other {b}}",
            "{kind, select, a {1} a {2} other {3}}",
        ] {
            let err = parse(source).unwrap_err();
            assert_eq!(err.code(), IntlErrorCode::InvalidMessage, "{source}");
            assert!(err.message().contains(source), "{}", err.message());
        }
    }
}
